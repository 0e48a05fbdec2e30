//! Core storefront logic.
//!
//! This module provides:
//! - [`Navigator`] - URL to view resolution (the navigation state machine)
//! - [`SellerDirectory`] - Slug to seller identity, cached
//! - [`FilterState`] and [`TagPicker`] - Active catalog filter and tag picking
//! - [`Catalog`] - Catalog query composition and loading
//! - [`ListingService`] and [`ReferenceService`] - The seller dashboard
//! - [`Backend`] - Document store seam, implemented in the browser by [`JsBackend`]

pub mod auth;
pub mod backend;
pub mod bridge;
pub mod catalog;
pub mod content;
pub mod directory;
pub mod error;
pub mod filter;
pub mod generation;
pub mod history;
pub mod listings;
pub mod navigation;
pub mod provisioning;
pub mod references;
pub mod routes;

#[cfg(test)]
pub mod testing;

pub use backend::Backend;
pub use bridge::JsBackend;
pub use catalog::{Catalog, CatalogOutcome};
pub use directory::SellerDirectory;
pub use filter::{FilterChange, FilterState, PickerPurpose, TagPicker};
pub use history::BrowserHistory;
pub use listings::{ListingDraft, ListingService};
pub use navigation::{NavOutcome, Navigator, PageView, Viewport};
pub use provisioning::{NewClient, NewSeller};
pub use references::{ReferenceService, ReferenceUpload};
