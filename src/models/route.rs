//! Page identifiers and path helpers for history-based navigation.
//!
//! URL format: plain paths (e.g. `/sellers/joaos-store`), pushed with the
//! History API. The route table itself lives in [`crate::core::routes`].

/// Path of the storefront page.
pub const STOREFRONT_PATH: &str = "/";

/// Path of the seller listing page.
pub const SELLERS_PATH: &str = "/sellers";

/// Prefix shared by every seller profile path.
const SELLER_PROFILE_PREFIX: &str = "/sellers/";

/// Logical page shown by the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageId {
    /// Product grid, optionally scoped to one seller.
    Storefront,
    /// Gallery of verified sellers.
    SellerListing,
    /// Community channels panel.
    Channels,
    /// Seller references panel.
    References,
    /// Account profile settings.
    SettingsProfile,
    /// Account security settings.
    SettingsSecurity,
}

impl PageId {
    /// DOM id of the panel rendering this page.
    pub fn panel_id(self) -> &'static str {
        match self {
            Self::Storefront => "products-page",
            Self::SellerListing => "sellers-page",
            Self::Channels => "channels-page",
            Self::References => "references-page",
            Self::SettingsProfile => "settings-profile-page",
            Self::SettingsSecurity => "settings-security-page",
        }
    }

    pub fn is_settings(self) -> bool {
        matches!(self, Self::SettingsProfile | Self::SettingsSecurity)
    }
}

/// Top-level navigation links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavLink {
    Storefront,
    Sellers,
    Channels,
    References,
}

impl NavLink {
    /// All links in display order.
    pub const ALL: [NavLink; 4] = [
        NavLink::Storefront,
        NavLink::Sellers,
        NavLink::Channels,
        NavLink::References,
    ];

    pub fn href(self) -> &'static str {
        match self {
            Self::Storefront => STOREFRONT_PATH,
            Self::Sellers => SELLERS_PATH,
            Self::Channels => "/channels",
            Self::References => "/references",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Storefront => "Accounts",
            Self::Sellers => "Sellers",
            Self::Channels => "Channels",
            Self::References => "References",
        }
    }

    /// Link highlighted while `page` is displayed.
    ///
    /// Seller-scoped storefronts highlight [`NavLink::Sellers`]; settings
    /// panels highlight nothing.
    pub fn for_page(page: PageId, seller_scoped: bool) -> Option<Self> {
        match page {
            PageId::Storefront if seller_scoped => Some(Self::Sellers),
            PageId::Storefront => Some(Self::Storefront),
            PageId::SellerListing => Some(Self::Sellers),
            PageId::Channels => Some(Self::Channels),
            PageId::References => Some(Self::References),
            PageId::SettingsProfile | PageId::SettingsSecurity => None,
        }
    }
}

/// Extract the slug from a seller profile path (`/sellers/<slug>`).
///
/// Returns `None` for any other path, including `/sellers/` with an empty
/// slug and nested paths such as `/sellers/a/b`. A single trailing slash is
/// tolerated.
pub fn seller_profile_slug(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(SELLER_PROFILE_PREFIX)?;
    let slug = rest.strip_suffix('/').unwrap_or(rest);
    if slug.is_empty() || slug.contains('/') {
        return None;
    }
    Some(slug)
}

/// Build the profile path for a seller slug.
pub fn seller_profile_path(slug: &str) -> String {
    format!("{}{}", SELLER_PROFILE_PREFIX, slug)
}
