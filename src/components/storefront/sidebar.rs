//! Catalog filter sidebar.
//!
//! Price presets and the tag filter are mutually exclusive; picking one
//! replaces the other through [`crate::core::FilterState`].

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::catalog::PRICE_PRESETS;
use crate::core::{FilterState, TagPicker};

stylance::import_crate_style!(css, "src/components/storefront/storefront.module.css");

#[component]
pub fn FilterSidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let open_picker = move |_: leptos::ev::MouseEvent| {
        ctx.ensure_item_catalog();
        let current = ctx.active_tags.get_untracked();
        ctx.filter_picker.open(TagPicker::for_filter(current, move |tags| {
            ctx.update_filter(|f| f.set_tag_filter(tags));
        }));
    };

    let sidebar_class = move || {
        if ctx.filter_panel_open.get() {
            format!("{} {}", css::sidebar, css::sidebarOpen)
        } else {
            css::sidebar.to_string()
        }
    };

    view! {
        <aside class=sidebar_class>
            <div class=css::sidebarHeader>
                <h2 class=css::sidebarTitle>"Filters"</h2>
                <button
                    class=css::closeButton
                    title="Close filters"
                    on:click=move |_| ctx.filter_panel_open.set(false)
                >
                    <Icon icon=ic::CLOSE />
                </button>
            </div>

            <section class=css::filterGroup>
                <h3 class=css::groupTitle>"Price"</h3>
                {PRICE_PRESETS
                    .iter()
                    .map(|&(value, label)| {
                        view! {
                            <label class=css::preset>
                                <input
                                    type="radio"
                                    name="price-preset"
                                    value=value
                                    prop:checked=move || ctx.active_preset.get() == Some(value)
                                    on:change=move |_| {
                                        ctx.update_filter(|f| f.select_price_preset(value));
                                    }
                                />
                                <span>{label}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </section>

            <section class=css::filterGroup>
                <h3 class=css::groupTitle>"Items"</h3>
                <button class=css::pickerButton on:click=open_picker>
                    <Icon icon=ic::SEARCH />
                    "Filter by items"
                </button>
                <div class=css::activeTags>
                    <For
                        each=move || ctx.active_tags.get()
                        key=|tag| tag.clone()
                        children=|tag| view! { <span class=css::activeTag>{tag}</span> }
                    />
                </div>
            </section>

            <button
                class=css::clearButton
                on:click=move |_| ctx.update_filter(FilterState::clear)
            >
                "Clear filters"
            </button>
        </aside>
    }
}
