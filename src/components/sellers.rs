//! Verified seller gallery.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::core::backend::Document;
use crate::models::{HistoryState, SellerRecord, seller_profile_path};

stylance::import_crate_style!(css, "src/components/sellers.module.css");

const DEFAULT_AVATAR: &str = "/images/icons/default_avatar.png";

#[derive(Clone, Debug, PartialEq)]
enum GalleryState {
    Loading,
    Loaded(Vec<Document<SellerRecord>>),
    Failed,
}

#[component]
pub fn SellerGallery() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = RwSignal::new(GalleryState::Loading);

    // Reload whenever a navigation asks for the gallery
    Effect::new(move |_| {
        if !ctx.view.with(|v| v.as_ref().is_some_and(|v| v.load_sellers)) {
            return;
        }
        let directory = Rc::clone(ctx.navigator().directory());
        state.set(GalleryState::Loading);
        spawn_local(async move {
            match directory.list_sellers().await {
                Ok(sellers) => state.set(GalleryState::Loaded(sellers)),
                Err(e) => {
                    leptos::logging::error!("Failed to load sellers: {}", e);
                    state.set(GalleryState::Failed);
                }
            }
        });
    });

    view! {
        <h1 class=css::title>"Verified sellers"</h1>
        {move || match state.get() {
            GalleryState::Loading => {
                view! { <p class=css::status>"Loading sellers..."</p> }.into_any()
            }
            GalleryState::Failed => {
                view! { <p class=css::statusError>"Could not load sellers."</p> }.into_any()
            }
            GalleryState::Loaded(sellers) if sellers.is_empty() => {
                view! { <p class=css::status>"No sellers yet."</p> }.into_any()
            }
            GalleryState::Loaded(sellers) => view! {
                <div class=css::gallery>
                    <For
                        each=move || sellers.clone()
                        key=|doc| doc.id.clone()
                        children=|doc| view! { <SellerCard doc=doc /> }
                    />
                </div>
            }
            .into_any(),
        }}
    }
}

#[component]
fn SellerCard(doc: Document<SellerRecord>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let scope = doc.data.to_scope(&doc.id);
    let href = seller_profile_path(&scope.slug);
    let avatar = doc
        .data
        .profile_image_url
        .clone()
        .unwrap_or_else(|| DEFAULT_AVATAR.to_string());
    let instagram = doc.data.instagram.clone().filter(|h| !h.trim().is_empty());
    let name = scope.seller_name.clone();

    let open_profile = {
        let href = href.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            ctx.navigate(href.clone(), HistoryState::for_seller(&scope));
        }
    };

    view! {
        <a class=css::card href=href on:click=open_profile>
            <img class=css::avatar src=avatar alt="" loading="lazy" />
            <span class=css::name>{name}</span>
            {instagram.map(|handle| view! {
                <span class=css::handle>{format!("@{}", handle.trim_start_matches('@'))}</span>
            })}
        </a>
    }
}
