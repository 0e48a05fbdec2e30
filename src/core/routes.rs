//! Static route table.
//!
//! Paths match exactly; `/sellers/<slug>` is recognized separately by
//! [`crate::models::seller_profile_slug`] before this table is consulted.

use crate::models::{PageId, SELLERS_PATH, STOREFRONT_PATH};

/// Work performed when a route is entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAction {
    /// Request the unfiltered catalog unless a seller scope is active.
    LoadAllProducts,
    /// Populate the seller gallery.
    LoadSellerGallery,
    /// Static panel; nothing to load.
    Static,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: PageId,
    pub action: RouteAction,
}

pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: STOREFRONT_PATH,
        page: PageId::Storefront,
        action: RouteAction::LoadAllProducts,
    },
    RouteEntry {
        path: SELLERS_PATH,
        page: PageId::SellerListing,
        action: RouteAction::LoadSellerGallery,
    },
    RouteEntry {
        path: "/channels",
        page: PageId::Channels,
        action: RouteAction::Static,
    },
    RouteEntry {
        path: "/references",
        page: PageId::References,
        action: RouteAction::Static,
    },
    RouteEntry {
        path: "/settings/profile",
        page: PageId::SettingsProfile,
        action: RouteAction::Static,
    },
    RouteEntry {
        path: "/settings/security",
        page: PageId::SettingsSecurity,
        action: RouteAction::Static,
    },
];

/// Find the route registered for exactly `path`.
pub fn lookup(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|route| route.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NavLink;

    #[test]
    fn test_exact_match_only() {
        assert_eq!(lookup("/").map(|r| r.page), Some(PageId::Storefront));
        assert_eq!(lookup("/sellers").map(|r| r.page), Some(PageId::SellerListing));
        assert_eq!(lookup("/sellers/"), None);
        assert_eq!(lookup("/channels/"), None);
        assert_eq!(lookup("/nope"), None);
    }

    #[test]
    fn test_nav_links_point_at_registered_routes() {
        for link in NavLink::ALL {
            assert!(lookup(link.href()).is_some(), "{:?}", link);
        }
    }

    #[test]
    fn test_paths_are_unique() {
        for (i, a) in ROUTES.iter().enumerate() {
            assert!(ROUTES[i + 1..].iter().all(|b| b.path != a.path));
        }
    }
}
