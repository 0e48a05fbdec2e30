//! Navigation state machine.
//!
//! Every trigger (initial load, [`Navigator::navigate`], popstate) runs one
//! cycle:
//!
//! ```text
//! Resolving ──▶ Rendering ──▶ Idle
//! ```
//!
//! - **Resolving**: view state is reset and, for `/sellers/<slug>`, the
//!   seller identity is resolved (history state first, then the directory)
//! - **Rendering**: the page, seller scope and catalog request are decided
//! - **Idle**: the resulting [`PageView`] has been handed back
//!
//! Each cycle takes a generation ticket. A cycle whose ticket went stale
//! while it was resolving returns [`NavOutcome::Superseded`] and leaves the
//! context untouched.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::logging::{error, warn};

use crate::core::backend::Backend;
use crate::core::directory::SellerDirectory;
use crate::core::filter::{FilterChange, FilterState};
use crate::core::generation::Generation;
use crate::core::history::History;
use crate::core::routes::{self, RouteAction};
use crate::models::{
    HistoryState, NavLink, PageId, SELLERS_PATH, SellerScope, seller_profile_slug,
};

// =============================================================================
// Navigation Context
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavPhase {
    Resolving,
    Rendering,
    #[default]
    Idle,
}

/// Per-trigger navigation state, rebuilt from scratch on every cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    pub path: String,
    pub page: Option<PageId>,
    pub seller_scope: Option<SellerScope>,
    pub history_state: HistoryState,
}

/// Everything the state machine owns between triggers.
#[derive(Debug, Default)]
pub struct NavigationContext {
    pub state: NavigationState,
    pub phase: NavPhase,
    pub filter: FilterState,
}

// =============================================================================
// Page View
// =============================================================================

/// Layout facts the filter button depends on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// At or below the mobile breakpoint.
    pub narrow: bool,
    pub filter_panel_open: bool,
}

/// What the UI should show after a navigation cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub page: PageId,
    pub path: String,
    pub seller_scope: Option<SellerScope>,
    pub active_link: Option<NavLink>,
    /// Catalog request to issue, if this page shows products.
    pub catalog: Option<FilterChange>,
    /// Whether the seller gallery should (re)load.
    pub load_sellers: bool,
}

impl PageView {
    /// Scoped storefront header ("Accounts from <name>").
    pub fn header(&self) -> Option<String> {
        self.seller_scope.as_ref().map(SellerScope::header)
    }

    /// Floating filter button: unscoped storefront on a narrow viewport
    /// while the side panel is closed.
    pub fn filter_button_visible(&self, viewport: Viewport) -> bool {
        self.page == PageId::Storefront
            && viewport.narrow
            && self.seller_scope.is_none()
            && !viewport.filter_panel_open
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavOutcome {
    Rendered(PageView),
    /// A newer trigger started while this one was resolving.
    Superseded,
}

// =============================================================================
// Navigator
// =============================================================================

pub struct Navigator<B, H> {
    history: H,
    directory: Rc<SellerDirectory<B>>,
    context: RefCell<NavigationContext>,
    generation: Generation,
}

impl<B: Backend + 'static, H: History> Navigator<B, H> {
    pub fn new(history: H, directory: Rc<SellerDirectory<B>>) -> Self {
        Self {
            history,
            directory,
            context: RefCell::new(NavigationContext::default()),
            generation: Generation::new(),
        }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn directory(&self) -> &Rc<SellerDirectory<B>> {
        &self.directory
    }

    pub fn phase(&self) -> NavPhase {
        self.context.borrow().phase
    }

    pub fn state(&self) -> NavigationState {
        self.context.borrow().state.clone()
    }

    /// Mutate the active filter and return the change to load.
    pub fn update_filter<R>(&self, f: impl FnOnce(&mut FilterState) -> R) -> R {
        f(&mut self.context.borrow_mut().filter)
    }

    /// Read the active filter.
    pub fn with_filter<R>(&self, f: impl FnOnce(&FilterState) -> R) -> R {
        f(&self.context.borrow().filter)
    }

    /// Go to `path`, pushing a history entry only if the path or the
    /// attached state differs from the current entry.
    pub async fn navigate(&self, path: &str, state: HistoryState) -> NavOutcome {
        if self.history.path() != path || self.history.state() != state {
            self.history.push(path, &state);
        }
        self.handle_route_change().await
    }

    /// Reconcile the view with the current URL and history state.
    pub async fn handle_route_change(&self) -> NavOutcome {
        let ticket = self.generation.advance();
        let path = self.history.path();
        let history_state = self.history.state();

        {
            let mut ctx = self.context.borrow_mut();
            ctx.phase = NavPhase::Resolving;
            ctx.filter.reset();
            ctx.state = NavigationState {
                path: path.clone(),
                page: None,
                seller_scope: None,
                history_state: history_state.clone(),
            };
        }

        if let Some(slug) = seller_profile_slug(&path) {
            let resolved = match history_state.seller_scope(slug) {
                Some(scope) => {
                    self.directory.prime(scope.clone());
                    Ok(Some(scope))
                }
                None => self.directory.resolve(slug).await,
            };

            if !ticket.is_current() {
                return NavOutcome::Superseded;
            }

            match resolved {
                Ok(Some(scope)) => {
                    return NavOutcome::Rendered(self.render(
                        PageId::Storefront,
                        RouteAction::LoadAllProducts,
                        Some(scope),
                    ));
                }
                Ok(None) => warn!("No seller found for '{}', showing all sellers", slug),
                Err(e) => error!("Seller lookup for '{}' failed: {}", slug, e),
            }

            // Normalize the URL so back/forward never revisits the failed profile
            self.history.replace(SELLERS_PATH, &HistoryState::default());
            return NavOutcome::Rendered(self.render(
                PageId::SellerListing,
                RouteAction::LoadSellerGallery,
                None,
            ));
        }

        let view = match routes::lookup(&path) {
            Some(route) => self.render(route.page, route.action, None),
            None => {
                warn!("Route not found: {}. Showing storefront.", path);
                self.render(PageId::Storefront, RouteAction::LoadAllProducts, None)
            }
        };
        NavOutcome::Rendered(view)
    }

    fn render(&self, page: PageId, action: RouteAction, scope: Option<SellerScope>) -> PageView {
        let mut ctx = self.context.borrow_mut();
        ctx.phase = NavPhase::Rendering;

        let catalog = match (&scope, action) {
            (Some(scope), _) => Some(ctx.filter.set_seller_scope(&scope.seller_id)),
            (None, RouteAction::LoadAllProducts) => Some(ctx.filter.clear()),
            (None, _) => None,
        };

        let path = self.history.path();
        let view = PageView {
            page,
            path: path.clone(),
            active_link: NavLink::for_page(page, scope.is_some()),
            seller_scope: scope.clone(),
            catalog,
            load_sellers: action == RouteAction::LoadSellerGallery,
        };

        ctx.state.path = path;
        ctx.state.page = Some(page);
        ctx.state.seller_scope = scope;
        ctx.phase = NavPhase::Idle;
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::backend::USERS;
    use crate::core::testing::{FakeBackend, MemoryHistory, seller};
    use crate::models::seller_profile_path;

    type TestNavigator = Navigator<FakeBackend, MemoryHistory>;

    fn navigator(backend: FakeBackend, path: &str) -> (Rc<FakeBackend>, TestNavigator) {
        let backend = Rc::new(backend);
        backend.insert(USERS, "u1", seller("João's Store", Some("joaos-store")));
        let directory = Rc::new(SellerDirectory::new(Rc::clone(&backend)));
        (backend, Navigator::new(MemoryHistory::new(path), directory))
    }

    fn rendered(outcome: NavOutcome) -> PageView {
        match outcome {
            NavOutcome::Rendered(view) => view,
            NavOutcome::Superseded => panic!("navigation was superseded"),
        }
    }

    #[tokio::test]
    async fn test_direct_profile_load_then_cached() {
        let (backend, nav) = navigator(FakeBackend::new(), "/sellers/joaos-store");

        let view = rendered(nav.handle_route_change().await);
        assert_eq!(view.page, PageId::Storefront);
        assert_eq!(view.header().as_deref(), Some("Accounts from João's Store"));
        assert_eq!(view.catalog, Some(FilterChange::for_seller("u1")));
        assert_eq!(view.active_link, Some(NavLink::Sellers));
        assert_eq!(backend.query_count(), 1);
        assert!(nav.directory().cached("joaos-store").is_some());

        rendered(nav.navigate("/", HistoryState::default()).await);
        let again = rendered(
            nav.navigate("/sellers/joaos-store", HistoryState::default())
                .await,
        );
        assert_eq!(again.seller_scope, view.seller_scope);
        assert_eq!(backend.query_count(), 1);
    }

    #[tokio::test]
    async fn test_history_state_skips_lookup() {
        let (backend, nav) = navigator(FakeBackend::new(), "/sellers");
        let scope = SellerScope {
            slug: "ana".to_string(),
            seller_id: "u7".to_string(),
            seller_name: "Ana".to_string(),
        };

        let view = rendered(
            nav.navigate(&seller_profile_path("ana"), HistoryState::for_seller(&scope))
                .await,
        );
        assert_eq!(view.seller_scope, Some(scope));
        assert_eq!(backend.query_count(), 0);
        assert!(nav.directory().cached("ana").is_some());
    }

    #[tokio::test]
    async fn test_unknown_path_shows_storefront() {
        let (_, nav) = navigator(FakeBackend::new(), "/nonexistent");

        let view = rendered(nav.handle_route_change().await);
        assert_eq!(view.page, PageId::Storefront);
        assert_eq!(view.catalog, Some(FilterChange::all()));
        assert_eq!(view.active_link, Some(NavLink::Storefront));
        assert_eq!(nav.phase(), NavPhase::Idle);
    }

    #[tokio::test]
    async fn test_failed_profile_falls_back_to_listing() {
        let (backend, nav) = navigator(FakeBackend::new(), "/sellers");
        rendered(nav.handle_route_change().await);

        let view = rendered(nav.navigate("/sellers/ghost", HistoryState::default()).await);
        assert_eq!(view.page, PageId::SellerListing);
        assert!(view.load_sellers);
        assert_eq!(view.catalog, None);
        assert_eq!(nav.history().path(), SELLERS_PATH);
        assert_eq!(nav.state().path, SELLERS_PATH);

        let lookups = backend.query_count();
        nav.history().back();
        let back = rendered(nav.handle_route_change().await);
        assert_eq!(back.page, PageId::SellerListing);
        assert_eq!(backend.query_count(), lookups);
        assert!(!nav.history().paths().iter().any(|p| p == "/sellers/ghost"));
    }

    #[tokio::test]
    async fn test_back_from_profile_restores_listing() {
        let (backend, nav) = navigator(FakeBackend::new(), "/sellers");
        rendered(nav.handle_route_change().await);
        rendered(
            nav.navigate("/sellers/joaos-store", HistoryState::default())
                .await,
        );
        let lookups = backend.query_count();

        nav.history().back();
        let view = rendered(nav.handle_route_change().await);
        assert_eq!(view.page, PageId::SellerListing);
        assert_eq!(view.seller_scope, None);
        assert_eq!(nav.with_filter(|f| f.seller_scope().map(str::to_string)), None);
        assert_eq!(backend.query_count(), lookups);
    }

    #[tokio::test]
    async fn test_backend_error_falls_back_to_listing() {
        let (backend, nav) = navigator(FakeBackend::new(), "/sellers/joaos-store");
        backend.fail_next_query("unavailable");

        let view = rendered(nav.handle_route_change().await);
        assert_eq!(view.page, PageId::SellerListing);
        assert_eq!(nav.history().path(), SELLERS_PATH);
    }

    #[tokio::test]
    async fn test_push_only_when_different() {
        let (_, nav) = navigator(FakeBackend::new(), "/");

        rendered(nav.navigate("/", HistoryState::default()).await);
        assert_eq!(nav.history().push_count(), 0);

        rendered(nav.navigate("/channels", HistoryState::default()).await);
        rendered(nav.navigate("/channels", HistoryState::default()).await);
        assert_eq!(nav.history().push_count(), 1);
        assert_eq!(nav.history().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_resolution_is_superseded() {
        let (backend, ready) = FakeBackend::gated();
        let (_, nav) = navigator(backend, "/");

        let (slow, fast, _) = futures::join!(
            nav.navigate("/sellers/joaos-store", HistoryState::default()),
            nav.navigate("/channels", HistoryState::default()),
            async {
                let _ = ready.send(());
            }
        );
        assert_eq!(slow, NavOutcome::Superseded);
        assert_eq!(rendered(fast).page, PageId::Channels);
        assert_eq!(nav.state().page, Some(PageId::Channels));
        assert_eq!(nav.state().seller_scope, None);
    }

    #[tokio::test]
    async fn test_settings_have_no_active_link() {
        let (_, nav) = navigator(FakeBackend::new(), "/settings/profile");
        let view = rendered(nav.handle_route_change().await);
        assert_eq!(view.page, PageId::SettingsProfile);
        assert_eq!(view.active_link, None);
        assert_eq!(view.catalog, None);
    }

    #[tokio::test]
    async fn test_filter_reset_between_navigations() {
        let (_, nav) = navigator(FakeBackend::new(), "/");
        rendered(nav.handle_route_change().await);
        nav.update_filter(|f| f.select_price_preset("800+"));
        assert_eq!(nav.with_filter(|f| f.active_price_preset()), Some("800+"));

        let view = rendered(nav.navigate("/references", HistoryState::default()).await);
        assert_eq!(view.catalog, None);
        assert_eq!(nav.with_filter(|f| f.active_price_preset()), Some("all"));
    }

    #[test]
    fn test_filter_button_visibility() {
        let view = PageView {
            page: PageId::Storefront,
            path: "/".to_string(),
            seller_scope: None,
            active_link: Some(NavLink::Storefront),
            catalog: Some(FilterChange::all()),
            load_sellers: false,
        };
        let narrow = Viewport {
            narrow: true,
            filter_panel_open: false,
        };
        assert!(view.filter_button_visible(narrow));
        assert!(!view.filter_button_visible(Viewport::default()));
        assert!(!view.filter_button_visible(Viewport {
            filter_panel_open: true,
            ..narrow
        }));

        let scoped = PageView {
            seller_scope: Some(SellerScope {
                slug: "ana".into(),
                seller_id: "u1".into(),
                seller_name: "Ana".into(),
            }),
            ..view.clone()
        };
        assert!(!scoped.filter_button_visible(narrow));

        let listing = PageView {
            page: PageId::SellerListing,
            ..view
        };
        assert!(!listing.filter_button_visible(narrow));
    }
}
