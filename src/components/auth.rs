//! Sign-in and client registration overlays.

use leptos::prelude::*;
use leptos_icons::Icon;
use wasm_bindgen_futures::spawn_local;

use crate::app::{AppContext, Overlay, ToastKind};
use crate::components::icons as ic;
use crate::core::NewClient;
use crate::core::auth::{self, Credentials};
use crate::core::error::AuthError;
use crate::core::provisioning::register_client;
use crate::models::Session;

stylance::import_crate_style!(css, "src/components/dashboard.module.css");

#[component]
fn PanelHeader(title: &'static str) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    view! {
        <header class=css::header>
            <h2 class=css::title>{title}</h2>
            <button class=css::iconButton title="Close" on:click=move |_| ctx.overlay.set(None)>
                <Icon icon=ic::CLOSE />
            </button>
        </header>
    }
}

#[component]
pub fn SignInPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let finish = move |result: Result<Option<Session>, AuthError>| {
        busy.set(false);
        match result {
            Ok(session) => {
                ctx.signed_in(session);
                ctx.notify("Signed in.", ToastKind::Success);
            }
            Err(AuthError::Cancelled) => {}
            Err(e) => ctx.notify(e.to_string(), ToastKind::Error),
        }
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let backend = ctx.backend();
        busy.set(true);
        spawn_local(async move {
            let result = auth::sign_in(backend.as_ref(), &credentials).await;
            if result.is_ok() {
                password.set(String::new());
            }
            finish(result);
        });
    };

    let with_provider = move |_: leptos::ev::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        let backend = ctx.backend();
        busy.set(true);
        spawn_local(async move {
            finish(auth::sign_in_with_provider(backend.as_ref()).await);
        });
    };

    view! {
        <div class=css::panel>
            <PanelHeader title="Sign in" />
            <form class=css::form on:submit=submit>
                <label class=css::field>
                    <span>"E-mail"</span>
                    <input type="email" autocomplete="email" bind:value=email />
                </label>
                <label class=css::field>
                    <span>"Password"</span>
                    <input type="password" autocomplete="current-password" bind:value=password />
                </label>
                <div class=css::formActions>
                    <button type="submit" class=css::primary disabled=move || busy.get()>
                        <Icon icon=ic::SIGN_IN />
                        "Sign in"
                    </button>
                </div>
            </form>
            <p class=css::divider>"or"</p>
            <button class=css::secondary disabled=move || busy.get() on:click=with_provider>
                "Continue with Google"
            </button>
            <button class=css::switchLink on:click=move |_| ctx.overlay.set(Some(Overlay::Register))>
                "No account yet? Create one"
            </button>
        </div>
    }
}

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let accepted_terms = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let client = NewClient {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            phone: phone.get_untracked(),
            accepted_terms: accepted_terms.get_untracked(),
        };
        if let Err(e) = client.validate() {
            ctx.notify(e.to_string(), ToastKind::Error);
            return;
        }

        let backend = ctx.backend();
        busy.set(true);
        spawn_local(async move {
            if let Err(e) = register_client(backend.as_ref(), &client).await {
                busy.set(false);
                ctx.notify(e.to_string(), ToastKind::Error);
                return;
            }
            ctx.notify("Account created.", ToastKind::Success);

            let credentials = Credentials {
                email: client.email.clone(),
                password: client.password.clone(),
            };
            let signed_in = auth::sign_in(backend.as_ref(), &credentials).await;
            busy.set(false);
            match signed_in {
                Ok(session) => ctx.signed_in(session),
                Err(e) => {
                    leptos::logging::warn!("Automatic sign-in after registration failed: {}", e);
                    ctx.overlay.set(Some(Overlay::SignIn));
                }
            }
        });
    };

    view! {
        <div class=css::panel>
            <PanelHeader title="Create account" />
            <form class=css::form on:submit=submit>
                <label class=css::field>
                    <span>"Name"</span>
                    <input type="text" autocomplete="name" bind:value=name />
                </label>
                <label class=css::field>
                    <span>"E-mail"</span>
                    <input type="email" autocomplete="email" bind:value=email />
                </label>
                <label class=css::field>
                    <span>"Password"</span>
                    <input type="password" autocomplete="new-password" bind:value=password />
                </label>
                <label class=css::field>
                    <span>"Phone"</span>
                    <input type="tel" placeholder="5511999990000" bind:value=phone />
                </label>
                <label class=css::checkbox>
                    <input type="checkbox" bind:checked=accepted_terms />
                    <span>"I accept the terms of use"</span>
                </label>
                <div class=css::formActions>
                    <button type="submit" class=css::primary disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Create account" }}
                    </button>
                </div>
            </form>
            <button class=css::switchLink on:click=move |_| ctx.overlay.set(Some(Overlay::SignIn))>
                "Already have an account? Sign in"
            </button>
        </div>
    }
}
