//! Utility modules for browser access, formatting and slugs.
//!
//! Provides:
//! - [`derive_slug`] - Seller name to URL slug
//! - [`fetch_json_cached`] - Static JSON fetching with timeout and session cache
//! - [`format_brl`], [`parse_price_input`] - Brazilian price formatting
//! - [`VideoEmbed`], [`whatsapp_link`] - Product card links

pub mod cache;
pub mod dom;
mod fetch;
mod format;
mod slug;
mod url;

pub use fetch::fetch_json_cached;
pub use format::{description_from_tags, format_brl, format_decimal_br, parse_price_input};
pub use slug::derive_slug;
pub use url::{VideoEmbed, whatsapp_link};
