//! Seller dashboard: the signed-in seller's own listings.

use std::rc::Rc;

use serde_json::{Value, json};

use crate::config::backend::PRODUCTS;
use crate::core::backend::{Backend, Constraint, Direction, Document, StoreQuery};
use crate::core::error::ListingError;
use crate::models::{Product, Session};
use crate::utils::{description_from_tags, format_decimal_br, parse_price_input};

/// Listing form contents as typed by the seller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    /// Brazilian notation, e.g. `"1.234,56"`.
    pub price: String,
    pub video_url: String,
    pub tags: Vec<String>,
}

/// A draft that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidListing {
    pub title: String,
    pub price: f64,
    pub video_url: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl ListingDraft {
    /// Prefill the edit form from a stored product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: format_decimal_br(product.price),
            video_url: product.video_url.clone().unwrap_or_default(),
            tags: product.tags.clone(),
        }
    }

    /// Title, price and video are required; a zero price counts as missing.
    pub fn validate(&self) -> Result<ValidListing, ListingError> {
        let title = self.title.trim();
        let video_url = self.video_url.trim();
        if title.is_empty() || video_url.is_empty() || self.price.trim().is_empty() {
            return Err(ListingError::MissingFields);
        }

        let price = parse_price_input(&self.price)
            .ok_or_else(|| ListingError::InvalidPrice(self.price.trim().to_string()))?;
        if price == 0.0 {
            return Err(ListingError::MissingFields);
        }

        Ok(ValidListing {
            title: title.to_string(),
            price,
            video_url: video_url.to_string(),
            tags: self.tags.clone(),
            description: description_from_tags(&self.tags),
        })
    }
}

impl ValidListing {
    /// Fields written on both create and edit.
    fn fields(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "price": self.price,
            "videoUrl": self.video_url,
            "tags": self.tags,
        })
    }
}

pub struct ListingService<B> {
    backend: Rc<B>,
}

impl<B: Backend> ListingService<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self { backend }
    }

    /// The seller's listings, newest first.
    pub async fn load_own(&self, session: &Session) -> Result<Vec<Document<Product>>, ListingError> {
        let query = StoreQuery::new()
            .filter(Constraint::eq("sellerId", session.uid.as_str()))
            .order_by("createdAt", Direction::Desc);
        Ok(self.backend.query(PRODUCTS, &query).await?)
    }

    /// Publish a new available listing and return its id.
    pub async fn create(
        &self,
        session: &Session,
        draft: &ListingDraft,
        created_at: f64,
    ) -> Result<String, ListingError> {
        if !session.is_seller() {
            return Err(ListingError::NotSeller);
        }
        let listing = draft.validate()?;

        let mut doc = listing.fields();
        doc["sellerId"] = json!(session.uid);
        doc["sellerName"] = json!(session.name);
        doc["sellerWhatsapp"] = json!(session.whatsapp);
        doc["available"] = json!(true);
        doc["createdAt"] = json!(created_at);

        Ok(self.backend.add(PRODUCTS, &doc).await?)
    }

    pub async fn update(&self, id: &str, draft: &ListingDraft) -> Result<(), ListingError> {
        let listing = draft.validate()?;
        Ok(self.backend.update(PRODUCTS, id, &listing.fields()).await?)
    }

    pub async fn set_available(&self, id: &str, available: bool) -> Result<(), ListingError> {
        let patch = json!({ "available": available });
        Ok(self.backend.update(PRODUCTS, id, &patch).await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ListingError> {
        Ok(self.backend.remove(PRODUCTS, id).await?)
    }
}
