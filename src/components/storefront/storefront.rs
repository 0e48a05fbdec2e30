//! Storefront page layout.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;

use super::header::StorefrontHeader;
use super::{FilterSidebar, ProductGrid};

stylance::import_crate_style!(css, "src/components/storefront/storefront.module.css");

/// Product page: header, filter sidebar and grid.
///
/// On narrow viewports the sidebar becomes a slide-in panel opened by the
/// floating filter button.
#[component]
pub fn Storefront() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let button_visible = Signal::derive(move || ctx.filter_button_visible());

    view! {
        <StorefrontHeader />
        <div class=css::layout>
            <FilterSidebar />
            <ProductGrid />
        </div>

        <Show when=move || button_visible.get()>
            <button
                class=css::fab
                title="Filters"
                on:click=move |_| ctx.filter_panel_open.set(true)
            >
                <Icon icon=ic::FILTER />
            </button>
        </Show>
    }
}
