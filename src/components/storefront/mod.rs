//! Storefront page components.
//!
//! Components:
//! - [`Storefront`] - Product page, unscoped or scoped to one seller
//! - [`FilterSidebar`] - Price presets and tag filter controls
//! - [`ProductGrid`] - Catalog results, loading and error states

mod grid;
mod header;
mod sidebar;
#[allow(clippy::module_inception)]
mod storefront;

pub use grid::ProductGrid;
pub use sidebar::FilterSidebar;
pub use storefront::Storefront;
