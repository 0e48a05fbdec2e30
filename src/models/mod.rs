//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`PageId`], [`NavLink`] - Pages and navigation links
//! - [`HistoryState`] - Data attached to browser history entries
//! - [`SellerScope`], [`SellerRecord`], [`Session`] - Seller identities and profiles
//! - [`Filter`], [`PriceRange`] - Catalog filters
//! - [`Product`], [`CatalogItem`] - Listings
//! - [`ItemCatalog`] - Tag picker categories
//! - [`Channels`], [`SaleReference`] - Static content panels

mod content;
mod filter;
mod history;
mod items;
mod product;
mod route;
mod seller;

pub use content::{ChannelLink, Channels, SaleReference};
pub use filter::{Filter, PriceRange};
pub use history::HistoryState;
pub use items::{ItemCatalog, ItemCategory, category_label};
pub use product::{CatalogItem, Product};
pub use route::{
    NavLink, PageId, SELLERS_PATH, STOREFRONT_PATH, seller_profile_path, seller_profile_slug,
};
pub use seller::{SellerContact, SellerDirectoryEntry, SellerRecord, SellerScope, Session};
