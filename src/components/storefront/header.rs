//! Storefront header with the seller-scope title.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{HistoryState, SELLERS_PATH};

stylance::import_crate_style!(css, "src/components/storefront/storefront.module.css");

#[component]
pub fn StorefrontHeader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let scoped_title = Memo::new(move |_| ctx.view.with(|v| v.as_ref().and_then(|v| v.header())));

    view! {
        <div class=css::header>
            {move || match scoped_title.get() {
                Some(title) => view! {
                    <button
                        class=css::backButton
                        on:click=move |_| ctx.navigate(SELLERS_PATH, HistoryState::default())
                    >
                        <Icon icon=ic::BACK />
                        "All sellers"
                    </button>
                    <h1 class=css::title>{title}</h1>
                }
                .into_any(),
                None => view! { <h1 class=css::title>"Game accounts for sale"</h1> }.into_any(),
            }}
        </div>
    }
}
