//! Loaders for the static content panels and the tag picker catalog.

use crate::config::backend::REFERENCES;
use crate::config::catalog::PAGE_SIZE;
use crate::config::{cache, data};
use crate::core::backend::{Backend, Direction, StoreQuery};
use crate::core::error::{BackendError, FetchError};
use crate::models::{Channels, ItemCatalog, SaleReference};
use crate::utils::fetch_json_cached;

/// Latest sale references, newest first.
pub async fn load_references<B: Backend>(backend: &B) -> Result<Vec<SaleReference>, BackendError> {
    backend.ready().await?;
    let query = StoreQuery::new()
        .order_by("createdAt", Direction::Desc)
        .limit(PAGE_SIZE);
    let docs = backend.query::<SaleReference>(REFERENCES, &query).await?;
    Ok(docs.into_iter().map(|doc| doc.data).collect())
}

pub async fn load_channels() -> Result<Channels, FetchError> {
    fetch_json_cached(data::CHANNELS_URL, cache::CHANNELS_KEY).await
}

/// Item categories for the tag picker, fetched once per session.
pub async fn load_item_catalog() -> Result<ItemCatalog, FetchError> {
    fetch_json_cached(data::ITEM_CATALOG_URL, cache::ITEM_CATALOG_KEY).await
}
