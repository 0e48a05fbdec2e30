//! Admin overlay for provisioning seller accounts.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::{AppContext, ToastKind};
use crate::components::icons as ic;
use crate::core::NewSeller;
use crate::core::backend::Document;
use crate::core::provisioning::{create_seller, delete_seller};
use crate::models::SellerRecord;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/dashboard.module.css");

#[component]
pub fn AdminPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_admin = move || ctx.session.with(|s| s.as_ref().is_some_and(|s| s.is_admin()));

    view! {
        <div class=css::panel>
            <header class=css::header>
                <h2 class=css::title>"Manage sellers"</h2>
                <button class=css::iconButton title="Close" on:click=move |_| ctx.overlay.set(None)>
                    <Icon icon=ic::CLOSE />
                </button>
            </header>
            <Show
                when=is_admin
                fallback=|| view! { <p class=css::status>"Only administrators can manage sellers."</p> }
            >
                <Provisioning />
            </Show>
        </div>
    }
}

#[component]
fn Provisioning() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let name = RwSignal::new(String::new());
    let whatsapp = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let sellers = RwSignal::new(None::<Vec<Document<SellerRecord>>>);

    let refresh = move || {
        let directory = ctx.navigator().directory().clone();
        spawn_local(async move {
            match directory.list_sellers().await {
                Ok(list) => sellers.set(Some(list)),
                Err(e) => {
                    leptos::logging::error!("Failed to load sellers: {}", e);
                    sellers.set(Some(Vec::new()));
                }
            }
        });
    };
    refresh();

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = NewSeller {
            name: name.get_untracked(),
            whatsapp: whatsapp.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        if let Err(e) = form.validate() {
            ctx.notify(e.to_string(), ToastKind::Error);
            return;
        }

        let backend = ctx.backend();
        busy.set(true);
        spawn_local(async move {
            let result = create_seller(backend.as_ref(), &form).await;
            busy.set(false);
            match result {
                Ok(uid) => {
                    leptos::logging::log!("Seller created: {}", uid);
                    ctx.notify(format!("Seller {} created.", form.name.trim()), ToastKind::Success);
                    for field in [name, whatsapp, email, password] {
                        field.set(String::new());
                    }
                    refresh();
                }
                Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
            }
        });
    };

    let remove = move |uid: String, seller_name: String| {
        if !dom::confirm(&format!("Delete seller {}?", seller_name)) {
            return;
        }
        let backend = ctx.backend();
        spawn_local(async move {
            match delete_seller(backend.as_ref(), &uid).await {
                Ok(()) => {
                    ctx.notify("Seller deleted.", ToastKind::Success);
                    refresh();
                }
                Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
            }
        });
    };

    view! {
        <form class=css::form on:submit=submit>
            <h3 class=css::formTitle>"New seller"</h3>
            <label class=css::field>
                <span>"Name"</span>
                <input type="text" bind:value=name />
            </label>
            <label class=css::field>
                <span>"WhatsApp"</span>
                <input type="tel" placeholder="5511999990000" bind:value=whatsapp />
            </label>
            <label class=css::field>
                <span>"E-mail"</span>
                <input type="email" bind:value=email />
            </label>
            <label class=css::field>
                <span>"Password"</span>
                <input type="password" autocomplete="new-password" bind:value=password />
            </label>
            <div class=css::formActions>
                <button type="submit" class=css::primary disabled=move || busy.get()>
                    {move || if busy.get() { "Creating..." } else { "Create seller" }}
                </button>
            </div>
        </form>

        {move || match sellers.get() {
            None => view! { <p class=css::status>"Loading sellers..."</p> }.into_any(),
            Some(list) => view! {
                <ul class=css::list>
                    {list
                        .into_iter()
                        .map(|doc| {
                            let uid = doc.id.clone();
                            let seller_name = doc.data.display_name().to_string();
                            let label = seller_name.clone();
                            view! {
                                <li class=css::row>
                                    <div class=css::rowInfo>
                                        <span class=css::rowTitle>{label}</span>
                                        <span class=css::hint>{doc.id}</span>
                                    </div>
                                    <button
                                        class=css::iconButton
                                        title="Delete seller"
                                        on:click=move |_| remove(uid.clone(), seller_name.clone())
                                    >
                                        <Icon icon=ic::CLOSE />
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            }
            .into_any(),
        }}
    }
}
