//! Application router component.
//!
//! Handles History API routing without leptos_router: the navigation state
//! machine in [`crate::core::navigation`] resolves every URL, and this
//! component only listens for browser events and renders the resulting
//! [`crate::core::PageView`].
//!
//! # Architecture
//!
//! - **URL path is the source of truth**: every trigger re-reads `location`
//! - **Layout never re-renders on navigation**: only the page slot swaps
//! - **popstate events**: browser back/forward re-run the route cycle
//! - **resize events**: keep the floating filter button in sync with layout

use leptos::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::Closure;

use crate::app::{AppContext, Overlay, ToastKind};
use crate::components::admin::AdminPanel;
use crate::components::auth::{RegisterPanel, SignInPanel};
use crate::components::dashboard::Dashboard;
use crate::components::nav::NavBar;
use crate::components::panels::{ChannelsPanel, ReferencesPanel, SettingsPanel};
use crate::components::sellers::SellerGallery;
use crate::components::storefront::Storefront;
use crate::components::tag_picker::TagPickerModal;
use crate::models::PageId;
#[cfg(target_arch = "wasm32")]
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/router.module.css");

// ============================================================================
// Main Router
// ============================================================================

#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Browser listeners (registered once on mount)
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let on_popstate = Closure::wrap(Box::new(move || {
            ctx.handle_route_change();
        }) as Box<dyn Fn()>);
        let on_resize = Closure::wrap(Box::new(move || {
            ctx.narrow_viewport.set(dom::is_narrow_viewport());
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
            let _ = window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }

        // Keep the closures alive for the lifetime of the app
        on_popstate.forget();
        on_resize.forget();
    }

    ctx.watch_session();
    ctx.handle_route_change();

    let page = Memo::new(move |_| ctx.view.with(|v| v.as_ref().map(|v| v.page)));

    view! {
        <div class=css::layout>
            <NavBar />
            <main class=css::main>
                {move || match page.get() {
                    None => view! { <div class=css::pending>"Loading..."</div> }.into_any(),
                    Some(page) => view! { <PagePanel page=page /> }.into_any(),
                }}
            </main>
        </div>

        <TagPickerModal handle=ctx.filter_picker />
        <TagPickerModal handle=ctx.listing_picker />
        <OverlayHost />
        <ToastHost />
    }
}

// ============================================================================
// Page Panels
// ============================================================================

/// Panel for one page, tagged with its stable DOM id.
#[component]
fn PagePanel(page: PageId) -> impl IntoView {
    let content = match page {
        PageId::Storefront => view! { <Storefront /> }.into_any(),
        PageId::SellerListing => view! { <SellerGallery /> }.into_any(),
        PageId::Channels => view! { <ChannelsPanel /> }.into_any(),
        PageId::References => view! { <ReferencesPanel /> }.into_any(),
        PageId::SettingsProfile | PageId::SettingsSecurity => {
            view! { <SettingsPanel page=page /> }.into_any()
        }
    };

    view! {
        <section id=page.panel_id() class=css::panel>
            {content}
        </section>
    }
}

// ============================================================================
// Overlays
// ============================================================================

#[component]
fn OverlayHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    move || {
        ctx.overlay.get().map(|overlay| {
            let content = match overlay {
                Overlay::SignIn => view! { <SignInPanel /> }.into_any(),
                Overlay::Register => view! { <RegisterPanel /> }.into_any(),
                Overlay::Dashboard => view! { <Dashboard /> }.into_any(),
                Overlay::Admin => view! { <AdminPanel /> }.into_any(),
            };
            view! {
                <div class=css::overlay on:click=move |_| ctx.overlay.set(None)>
                    <div class=css::overlayCard on:click=|ev| ev.stop_propagation()>
                        {content}
                    </div>
                </div>
            }
        })
    }
}

#[component]
fn ToastHost() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    move || {
        ctx.toast.get().map(|toast| {
            let class = match toast.kind {
                ToastKind::Success => format!("{} {}", css::toast, css::toastSuccess),
                ToastKind::Error => format!("{} {}", css::toast, css::toastError),
            };
            view! { <div class=class role="status">{toast.message}</div> }
        })
    }
}
