//! Root application module.
//!
//! Contains the main App component, the AppContext definition, and the glue
//! between the core state machine and Leptos signals.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::AppRouter;
use crate::components::tag_picker::PickerHandle;
use crate::config::ui::TOAST_DURATION_MS;
use crate::core::auth;
use crate::core::content::load_item_catalog;
use crate::core::error::QueryError;
use crate::core::{
    Backend, BrowserHistory, Catalog, CatalogOutcome, FilterChange, FilterState, JsBackend,
    ListingService, NavOutcome, Navigator, PageView, ReferenceService, SellerDirectory, Viewport,
};
use crate::models::{CatalogItem, HistoryState, ItemCatalog, STOREFRONT_PATH, Session};
use crate::utils::dom;

pub type AppNavigator = Navigator<JsBackend, BrowserHistory>;

// ============================================================================
// Services
// ============================================================================

/// Non-reactive application services, shared through a local [`StoredValue`].
#[derive(Clone)]
pub struct Services {
    pub backend: Rc<JsBackend>,
    pub navigator: Rc<AppNavigator>,
    pub catalog: Rc<Catalog<JsBackend>>,
    pub listings: Rc<ListingService<JsBackend>>,
    pub references: Rc<ReferenceService<JsBackend>>,
}

impl Services {
    fn new() -> Self {
        let backend = Rc::new(JsBackend::new());
        let directory = Rc::new(SellerDirectory::new(Rc::clone(&backend)));
        Self {
            navigator: Rc::new(Navigator::new(BrowserHistory, directory)),
            catalog: Rc::new(Catalog::new(Rc::clone(&backend))),
            listings: Rc::new(ListingService::new(Rc::clone(&backend))),
            references: Rc::new(ReferenceService::new(Rc::clone(&backend))),
            backend,
        }
    }
}

// ============================================================================
// View State
// ============================================================================

/// Product grid contents.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogView {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<CatalogItem>),
    Failed(QueryError),
}

/// Modal panels opened from the user menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    SignIn,
    Register,
    Dashboard,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Item catalog load state shared by both tag pickers.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ItemCatalogState {
    #[default]
    NotLoaded,
    Loading,
    Ready(ItemCatalog),
    Failed(String),
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component using `use_context::<AppContext>()`. Signals hold what the UI
/// renders; [`Services`] hold the state machine and backend handles.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub services: StoredValue<Services, LocalStorage>,

    /// Result of the latest navigation cycle.
    pub view: RwSignal<Option<PageView>>,
    pub products: RwSignal<CatalogView>,

    /// Sidebar preset matching the active filter.
    pub active_preset: RwSignal<Option<&'static str>>,
    pub active_tags: RwSignal<Vec<String>>,

    pub filter_panel_open: RwSignal<bool>,
    pub narrow_viewport: RwSignal<bool>,

    pub session: RwSignal<Option<Session>>,
    pub overlay: RwSignal<Option<Overlay>>,
    pub toast: RwSignal<Option<Toast>>,

    pub item_catalog: RwSignal<ItemCatalogState>,
    /// Tag picker feeding the storefront filter.
    pub filter_picker: PickerHandle,
    /// Tag picker feeding the dashboard listing form.
    pub listing_picker: PickerHandle,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            services: StoredValue::new_local(Services::new()),
            view: RwSignal::new(None),
            products: RwSignal::new(CatalogView::Idle),
            active_preset: RwSignal::new(Some("all")),
            active_tags: RwSignal::new(Vec::new()),
            filter_panel_open: RwSignal::new(false),
            narrow_viewport: RwSignal::new(dom::is_narrow_viewport()),
            session: RwSignal::new(None),
            overlay: RwSignal::new(None),
            toast: RwSignal::new(None),
            item_catalog: RwSignal::new(ItemCatalogState::NotLoaded),
            filter_picker: PickerHandle::new(),
            listing_picker: PickerHandle::new(),
        }
    }

    pub fn navigator(&self) -> Rc<AppNavigator> {
        self.services.with_value(|s| Rc::clone(&s.navigator))
    }

    pub fn backend(&self) -> Rc<JsBackend> {
        self.services.with_value(|s| Rc::clone(&s.backend))
    }

    pub fn listings(&self) -> Rc<ListingService<JsBackend>> {
        self.services.with_value(|s| Rc::clone(&s.listings))
    }

    pub fn references(&self) -> Rc<ReferenceService<JsBackend>> {
        self.services.with_value(|s| Rc::clone(&s.references))
    }

    // --- Navigation ---

    /// Navigate in-app, pushing a history entry when needed.
    pub fn navigate(self, path: impl Into<String>, state: HistoryState) {
        let path = path.into();
        let navigator = self.navigator();
        spawn_local(async move {
            let outcome = navigator.navigate(&path, state).await;
            self.apply_navigation(outcome);
        });
    }

    /// Re-read the URL (initial load, popstate).
    pub fn handle_route_change(self) {
        let navigator = self.navigator();
        spawn_local(async move {
            let outcome = navigator.handle_route_change().await;
            self.apply_navigation(outcome);
        });
    }

    fn apply_navigation(self, outcome: NavOutcome) {
        let NavOutcome::Rendered(view) = outcome else {
            return;
        };

        self.filter_panel_open.set(false);
        self.sync_filter_indicators();
        if let Some(change) = view.catalog.clone() {
            self.load_catalog(change);
        }
        self.view.set(Some(view));
        dom::scroll_to_top();
    }

    /// Floating filter button visibility for the current view and layout.
    pub fn filter_button_visible(&self) -> bool {
        let viewport = Viewport {
            narrow: self.narrow_viewport.get(),
            filter_panel_open: self.filter_panel_open.get(),
        };
        self.view
            .with(|v| v.as_ref().is_some_and(|v| v.filter_button_visible(viewport)))
    }

    // --- Catalog ---

    /// Apply a filter mutation and reload the grid.
    pub fn update_filter(self, f: impl FnOnce(&mut FilterState) -> FilterChange) {
        let change = self.navigator().update_filter(f);
        self.sync_filter_indicators();
        self.load_catalog(change);
    }

    fn sync_filter_indicators(self) {
        let navigator = self.navigator();
        let (preset, tags) =
            navigator.with_filter(|f| (f.active_price_preset(), f.active_tags()));
        self.active_preset.set(preset);
        self.active_tags.set(tags);
    }

    pub fn load_catalog(self, change: FilterChange) {
        let catalog = self.services.with_value(|s| Rc::clone(&s.catalog));
        self.products.set(CatalogView::Loading);
        spawn_local(async move {
            match catalog.load(&change).await {
                CatalogOutcome::Loaded(items) => self.products.set(CatalogView::Loaded(items)),
                CatalogOutcome::Failed(err) => self.products.set(CatalogView::Failed(err)),
                CatalogOutcome::Superseded => {}
            }
        });
    }

    /// Fetch the item catalog on first use.
    pub fn ensure_item_catalog(self) {
        if !matches!(
            self.item_catalog.get_untracked(),
            ItemCatalogState::NotLoaded | ItemCatalogState::Failed(_)
        ) {
            return;
        }
        self.item_catalog.set(ItemCatalogState::Loading);
        spawn_local(async move {
            let state = match load_item_catalog().await {
                Ok(catalog) => ItemCatalogState::Ready(catalog),
                Err(e) => {
                    leptos::logging::error!("Item catalog unavailable: {}", e);
                    ItemCatalogState::Failed(e.to_string())
                }
            };
            self.item_catalog.set(state);
        });
    }

    // --- Session & feedback ---

    /// Track the signed-in user once the backend is ready.
    pub fn watch_session(self) {
        if !JsBackend::is_available() {
            leptos::logging::error!("Backend bridge missing; catalog and sign-in are unavailable");
        }
        let backend = self.backend();
        let session = self.session;
        backend.on_auth_changed(move |user| session.set(user));
        spawn_local(async move {
            match backend.ready().await {
                Ok(()) => session.set(backend.current_user()),
                Err(e) => leptos::logging::error!("Backend failed to initialize: {}", e),
            }
        });
    }

    /// Adopt the session reported by an explicit sign-in and close the form.
    ///
    /// Bridges with `onAuthChanged` report the same session on their own.
    pub fn signed_in(self, session: Option<Session>) {
        if session.is_some() {
            self.session.set(session);
        }
        self.overlay.set(None);
    }

    /// Sign out and return to the storefront.
    pub fn sign_out(self) {
        let backend = self.backend();
        spawn_local(async move {
            match auth::sign_out(backend.as_ref()).await {
                Ok(()) => {
                    self.session.set(None);
                    self.overlay.set(None);
                    self.notify("You signed out.", ToastKind::Success);
                    self.navigate(STOREFRONT_PATH, HistoryState::default());
                }
                Err(e) => {
                    leptos::logging::error!("Sign-out failed: {}", e);
                    self.notify(e.to_string(), ToastKind::Error);
                }
            }
        });
    }

    /// Show a transient message.
    pub fn notify(self, message: impl Into<String>, kind: ToastKind) {
        let toast = Toast {
            message: message.into(),
            kind,
        };
        self.toast.set(Some(toast.clone()));
        let slot = self.toast;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            // A newer toast may have replaced this one
            if slot.get_untracked().as_ref() == Some(&toast) {
                slot.set(None);
            }
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the router, which owns the page layout
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #10131c;
                    color: #e8e8ef;
                    font-family: system-ui, sans-serif;
                ">
                    <div style="max-width: 600px; text-align: center;">
                        <h1 style="color: #ff5c7a; margin-bottom: 1rem;">
                            "Something went wrong"
                        </h1>
                        <p style="color: #a0a3b1; margin-bottom: 2rem;">
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details style="
                            text-align: left;
                            background: #1a1e2b;
                            padding: 1rem;
                            border-radius: 8px;
                            margin-bottom: 1rem;
                        ">
                            <summary style="cursor: pointer; color: #7c8196;">
                                "Error details"
                            </summary>
                            <ul style="margin: 1rem 0 0 0; padding-left: 1.5rem; color: #ff5c7a;">
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            on:click=move |_| dom::reload()
                            style="
                                background: #7b5cff;
                                color: white;
                                border: none;
                                padding: 0.75rem 2rem;
                                border-radius: 8px;
                                cursor: pointer;
                                font-size: 1rem;
                            "
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
