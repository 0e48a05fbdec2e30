//! Product grid.

use leptos::prelude::*;

use crate::app::{AppContext, CatalogView};
use crate::components::product_card::ProductCard;
use crate::core::error::QueryError;

stylance::import_crate_style!(css, "src/components/storefront/storefront.module.css");

#[component]
pub fn ProductGrid() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::results>
            {move || match ctx.products.get() {
                CatalogView::Idle | CatalogView::Loading => {
                    view! { <p class=css::status>"Loading accounts..."</p> }.into_any()
                }
                CatalogView::Loaded(items) if items.is_empty() => {
                    view! { <p class=css::status>"No accounts match these filters."</p> }
                        .into_any()
                }
                CatalogView::Loaded(items) => view! {
                    <div class=css::grid>
                        <For
                            each=move || items.clone()
                            key=|item| item.id.clone()
                            children=|item| view! { <ProductCard item=item /> }
                        />
                    </div>
                }
                .into_any(),
                CatalogView::Failed(err) => view! { <QueryFailure err=err /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn QueryFailure(err: QueryError) -> impl IntoView {
    let link = match &err {
        QueryError::MissingIndex { link } => Some(link.clone()),
        _ => None,
    };

    view! {
        <div class=css::error>
            <p>{err.user_message()}</p>
            {link.map(|href| view! {
                <a class=css::errorLink href=href target="_blank" rel="noopener noreferrer">
                    "Create the index"
                </a>
            })}
        </div>
    }
}
