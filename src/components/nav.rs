//! Top navigation bar.
//!
//! Links are real anchors so they work without scripting, but clicks are
//! intercepted and routed through [`AppContext::navigate`].

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, Overlay};
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::models::{HistoryState, NavLink, STOREFRONT_PATH};

stylance::import_crate_style!(css, "src/components/nav.module.css");

const PROFILE_PATH: &str = "/settings/profile";

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let active_link = Memo::new(move |_| ctx.view.with(|v| v.as_ref().and_then(|v| v.active_link)));

    let go = move |path: &'static str| {
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            ctx.navigate(path, HistoryState::default());
        }
    };

    view! {
        <header class=css::bar>
            <a class=css::brand href=STOREFRONT_PATH on:click=go(STOREFRONT_PATH)>
                {APP_NAME}
            </a>

            <nav class=css::links>
                {NavLink::ALL
                    .into_iter()
                    .map(|link| {
                        view! {
                            <a
                                href=link.href()
                                class=move || {
                                    if active_link.get() == Some(link) {
                                        format!("{} {}", css::link, css::linkActive)
                                    } else {
                                        css::link.to_string()
                                    }
                                }
                                on:click=go(link.href())
                            >
                                <Icon icon=ic::nav_icon(link) />
                                <span class=css::linkLabel>{link.label()}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>

            <UserMenu />
        </header>
    }
}

/// Sign-in button, or the signed-in user's actions.
#[component]
fn UserMenu() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let on_settings = Memo::new(move |_| {
        ctx.view.with(|v| v.as_ref().is_some_and(|v| v.page.is_settings()))
    });

    move || match ctx.session.get() {
        None => view! {
            <div class=css::user>
                <button
                    class=css::action
                    title="Sign in"
                    on:click=move |_| ctx.overlay.set(Some(Overlay::SignIn))
                >
                    <Icon icon=ic::SIGN_IN />
                </button>
            </div>
        }
        .into_any(),
        Some(session) => {
            let is_seller = session.is_seller();
            let is_admin = session.is_admin();
            view! {
                <div class=css::user>
                    <a
                        class=move || {
                            if on_settings.get() {
                                format!("{} {}", css::userName, css::linkActive)
                            } else {
                                css::userName.to_string()
                            }
                        }
                        href=PROFILE_PATH
                        on:click=move |ev: leptos::ev::MouseEvent| {
                            ev.prevent_default();
                            ctx.navigate(PROFILE_PATH, HistoryState::default());
                        }
                    >
                        <Icon icon=ic::SELLER />
                        <span>{session.name.clone()}</span>
                    </a>
                    <Show when=move || is_seller>
                        <button
                            class=css::action
                            title="My dashboard"
                            on:click=move |_| ctx.overlay.set(Some(Overlay::Dashboard))
                        >
                            <Icon icon=ic::DASHBOARD />
                        </button>
                    </Show>
                    <Show when=move || is_admin>
                        <button
                            class=css::action
                            title="Manage sellers"
                            on:click=move |_| ctx.overlay.set(Some(Overlay::Admin))
                        >
                            <Icon icon=ic::ADMIN />
                        </button>
                    </Show>
                    <button class=css::action title="Sign out" on:click=move |_| ctx.sign_out()>
                        <Icon icon=ic::SIGN_OUT />
                    </button>
                </div>
            }
            .into_any()
        }
    }
}
