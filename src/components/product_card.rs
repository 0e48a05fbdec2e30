//! Product card shown in the storefront grid.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;
use crate::models::CatalogItem;
use crate::utils::{VideoEmbed, format_brl, whatsapp_link};

stylance::import_crate_style!(css, "src/components/product_card.module.css");

#[component]
pub fn ProductCard(item: CatalogItem) -> impl IntoView {
    let CatalogItem {
        product, seller, ..
    } = item;

    let price = format_brl(product.price);
    let contact = seller
        .whatsapp
        .as_deref()
        .and_then(|phone| whatsapp_link(phone, &seller.name, product.display_title(), &price));
    let embed = VideoEmbed::classify(product.video_url.as_deref());

    view! {
        <article class=css::card>
            <VideoPreview embed=embed />
            <div class=css::content>
                <h3 class=css::title>{product.display_title().to_string()}</h3>
                <p class=css::description>{product.display_description().to_string()}</p>
                <div class=css::tags>
                    {product
                        .tags
                        .iter()
                        .map(|tag| view! { <span class=css::tag>{tag.clone()}</span> })
                        .collect_view()}
                </div>
                <div class=css::footer>
                    <span class=css::price>{price}</span>
                    <span class=css::seller>{seller.name}</span>
                </div>
                {match contact {
                    Some(href) => view! {
                        <a class=css::contact href=href target="_blank" rel="noopener noreferrer">
                            "Buy on WhatsApp"
                            <Icon icon=ic::EXTERNAL_LINK />
                        </a>
                    }
                    .into_any(),
                    None => view! {
                        <span class=format!("{} {}", css::contact, css::contactDisabled)>
                            "Contact unavailable"
                        </span>
                    }
                    .into_any(),
                }}
            </div>
        </article>
    }
}

#[component]
fn VideoPreview(embed: VideoEmbed) -> impl IntoView {
    let inner = match embed {
        VideoEmbed::YouTube(src) | VideoEmbed::Drive(src) => view! {
            <iframe
                class=css::frame
                src=src
                allow="accelerometer; encrypted-media; gyroscope; picture-in-picture"
                allowfullscreen=true
            ></iframe>
        }
        .into_any(),
        VideoEmbed::Video(src) => view! {
            <video class=css::frame src=src controls=true preload="metadata"></video>
        }
        .into_any(),
        VideoEmbed::Unavailable(message) => {
            view! { <div class=css::placeholder>{message}</div> }.into_any()
        }
    };

    view! { <div class=css::media>{inner}</div> }
}
