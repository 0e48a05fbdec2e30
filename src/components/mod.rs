//! UI components built with Leptos.
//!
//! - [`router`] - Application routing and page layout (main entry point)
//! - [`nav`] - Top navigation bar and user menu
//! - [`storefront`] - Product page with filters and grid
//! - [`sellers`] - Verified seller gallery
//! - [`panels`] - Channels, references and account panels
//! - [`tag_picker`] - Item tag picker modal
//! - [`auth`] - Sign-in and registration overlays
//! - [`dashboard`], [`admin`] - Seller and admin overlays
//! - [`icons`] - Centralized icon definitions

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod icons;
pub mod nav;
pub mod panels;
pub mod product_card;
pub mod router;
pub mod sellers;
pub mod storefront;
pub mod tag_picker;

pub use router::AppRouter;
