//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Store name displayed in the header and in contact messages.
pub const APP_NAME: &str = "ZX Store";

// =============================================================================
// Backend Configuration
// =============================================================================

/// Backend bridge configuration.
///
/// The host page installs a JavaScript object under [`backend::BRIDGE_GLOBAL`]
/// before the WASM bundle starts.
pub mod backend {
    /// Name of the global bridge object on `window`.
    pub const BRIDGE_GLOBAL: &str = "zxBackend";

    /// Collection holding product listings.
    pub const PRODUCTS: &str = "produtos";

    /// Collection holding user profiles (sellers, admins, clients).
    pub const USERS: &str = "users";

    /// Collection holding sale reference screenshots.
    pub const REFERENCES: &str = "references";

    /// Role value stored on seller profiles.
    pub const SELLER_ROLE: &str = "vendedor";

    /// Role value stored on administrator profiles.
    pub const ADMIN_ROLE: &str = "admin";

    /// Callable that provisions a seller account.
    pub const CREATE_SELLER_FN: &str = "createSeller";

    /// Callable that removes a seller account.
    pub const DELETE_SELLER_FN: &str = "deleteSeller";

    /// Callable that registers a client account.
    pub const CREATE_CLIENT_FN: &str = "createClientUser";

    /// Object storage folder for reference images, one subfolder per seller.
    pub const REFERENCE_STORAGE_DIR: &str = "references";
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Catalog query limits.
pub mod catalog {
    /// Maximum number of products returned by one catalog query.
    pub const PAGE_SIZE: usize = 50;

    /// Largest value list the store accepts for `array-contains-any`.
    pub const MAX_ARRAY_MEMBERSHIP: usize = 10;

    /// Number of tags used to build a generated listing description.
    pub const DESCRIPTION_TAGS: usize = 5;

    /// Display name used when a product's seller cannot be loaded.
    pub const UNKNOWN_SELLER_NAME: &str = "Verified seller";

    /// Price presets shown in the filter sidebar as `(value, label)`.
    ///
    /// Values are parsed by [`crate::models::PriceRange::parse`].
    pub const PRICE_PRESETS: &[(&str, &str)] = &[
        ("all", "All accounts"),
        ("0-100", "Up to R$ 100"),
        ("100-300", "R$ 100 to R$ 300"),
        ("300-800", "R$ 300 to R$ 800"),
        ("800+", "Above R$ 800"),
    ];
}

// =============================================================================
// Static Data
// =============================================================================

/// Static JSON assets served next to the bundle.
pub mod data {
    /// Categorized item catalog used by the tag picker.
    pub const ITEM_CATALOG_URL: &str = "/data/item.json";

    /// Community channel list.
    pub const CHANNELS_URL: &str = "/data/channels.json";
}

/// Session cache configuration.
pub mod cache {
    /// sessionStorage key for the item catalog.
    pub const ITEM_CATALOG_KEY: &str = "item_catalog_cache";

    /// sessionStorage key for the channel list.
    pub const CHANNELS_KEY: &str = "channels_cache";
}

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: u32 = 10000;

// =============================================================================
// UI Configuration
// =============================================================================

/// Layout constants.
pub mod ui {
    /// Viewports at or below this width (in CSS pixels) count as narrow.
    pub const MOBILE_BREAKPOINT: f64 = 768.0;

    /// How long a toast stays visible, in milliseconds.
    pub const TOAST_DURATION_MS: u32 = 3500;
}
