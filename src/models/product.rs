//! Product listings.

use serde::{Deserialize, Serialize};

use super::SellerContact;

/// Product document as stored in the `produtos` collection.
///
/// `created_at` is the server timestamp in milliseconds since the epoch, as
/// converted by the backend bridge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub seller_id: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub created_at: Option<f64>,
}

impl Product {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled account"
        } else {
            &self.title
        }
    }

    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            "No description."
        } else {
            &self.description
        }
    }
}

/// A product ready for display: the record plus its seller's contact.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub product: Product,
    pub seller: SellerContact,
}
