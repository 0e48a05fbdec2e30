//! Seller identities and profile records.

use serde::{Deserialize, Serialize};

use crate::config::{backend::ADMIN_ROLE, backend::SELLER_ROLE, catalog::UNKNOWN_SELLER_NAME};
use crate::utils::derive_slug;

/// Resolved seller identity, as cached by the seller directory.
///
/// The same value scopes the storefront to one seller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerScope {
    pub slug: String,
    pub seller_id: String,
    pub seller_name: String,
}

impl SellerScope {
    /// Header shown above a seller-scoped product grid.
    pub fn header(&self) -> String {
        format!("Accounts from {}", self.seller_name)
    }
}

/// Seller directory cache entry.
pub type SellerDirectoryEntry = SellerScope;

/// User profile document as stored in the `users` collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl SellerRecord {
    /// Name to display, falling back to a generic label for unnamed records.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { UNKNOWN_SELLER_NAME } else { name }
    }

    /// Slug stored on the record, ignoring blank values.
    pub fn stored_slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Public slug: the stored one, or one derived from the name for legacy
    /// records.
    ///
    /// Names with nothing sluggable (no ASCII letters or digits) fall back to
    /// the seller id, which is never empty.
    pub fn public_slug(&self, seller_id: &str) -> String {
        if let Some(slug) = self.stored_slug() {
            return slug.to_string();
        }
        let derived = derive_slug(&self.name);
        if derived.is_empty() {
            seller_id.to_string()
        } else {
            derived
        }
    }

    /// Build the directory entry for this record.
    pub fn to_scope(&self, seller_id: &str) -> SellerScope {
        SellerScope {
            slug: self.public_slug(seller_id),
            seller_id: seller_id.to_string(),
            seller_name: self.display_name().to_string(),
        }
    }

    /// Contact details used on product cards.
    pub fn contact(&self) -> SellerContact {
        SellerContact {
            name: self.display_name().to_string(),
            whatsapp: self
                .whatsapp
                .as_deref()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string),
        }
    }
}

/// Seller name and contact handle attached to a product card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellerContact {
    pub name: String,
    pub whatsapp: Option<String>,
}

impl SellerContact {
    /// Placeholder used when the seller profile is missing or unreadable.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_SELLER_NAME.to_string(),
            whatsapp: None,
        }
    }
}

/// Signed-in user as reported by the auth backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
}

impl Session {
    pub fn is_seller(&self) -> bool {
        self.role.as_deref() == Some(SELLER_ROLE)
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}
