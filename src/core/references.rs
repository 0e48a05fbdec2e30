//! Seller dashboard: the signed-in seller's proof-of-sale images.
//!
//! An image is first stored under `references/<uid>/`, then recorded in the
//! references collection with its download URL. Deletion removes the record
//! first; a stored object left behind only costs storage.

use std::rc::Rc;

use leptos::logging::warn;
use serde_json::json;

use crate::config::backend::{REFERENCES, REFERENCE_STORAGE_DIR};
use crate::core::backend::{Backend, Constraint, Direction, Document, StoreQuery};
use crate::core::error::ReferenceError;
use crate::models::{SaleReference, Session};

/// An image file picked in the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReferenceUpload {
    pub fn validate(&self) -> Result<(), ReferenceError> {
        if self.bytes.is_empty() {
            return Err(ReferenceError::MissingFile);
        }
        if !self.content_type.starts_with("image/") {
            return Err(ReferenceError::NotAnImage);
        }
        Ok(())
    }

    /// Storage path: `references/<uid>/ref_<uid>_<millis>[.<ext>]`.
    pub fn storage_path(&self, uid: &str, uploaded_at: f64) -> String {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        let mut path = format!(
            "{}/{}/ref_{}_{}",
            REFERENCE_STORAGE_DIR, uid, uid, uploaded_at as u64
        );
        if let Some(ext) = extension {
            path.push('.');
            path.push_str(&ext);
        }
        path
    }
}

pub struct ReferenceService<B> {
    backend: Rc<B>,
}

impl<B: Backend> ReferenceService<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self { backend }
    }

    /// The seller's references, newest first.
    pub async fn load_own(
        &self,
        session: &Session,
    ) -> Result<Vec<Document<SaleReference>>, ReferenceError> {
        let query = StoreQuery::new()
            .filter(Constraint::eq("sellerId", session.uid.as_str()))
            .order_by("createdAt", Direction::Desc);
        Ok(self.backend.query(REFERENCES, &query).await?)
    }

    /// Upload an image and record it; returns the new reference id.
    pub async fn add(
        &self,
        session: &Session,
        upload: &ReferenceUpload,
        uploaded_at: f64,
    ) -> Result<String, ReferenceError> {
        if !session.is_seller() {
            return Err(ReferenceError::NotSeller);
        }
        upload.validate()?;

        let path = upload.storage_path(&session.uid, uploaded_at);
        let image_url = self
            .backend
            .upload(&path, &upload.bytes, &upload.content_type)
            .await?;

        let doc = json!({
            "imageUrl": image_url,
            "sellerId": session.uid,
            "sellerName": session.name,
            "createdAt": uploaded_at,
        });
        Ok(self.backend.add(REFERENCES, &doc).await?)
    }

    pub async fn delete(&self, reference: &Document<SaleReference>) -> Result<(), ReferenceError> {
        self.backend.remove(REFERENCES, &reference.id).await?;

        let url = reference.data.image_url.as_str();
        if url.is_empty() {
            return Ok(());
        }
        if let Err(e) = self.backend.delete_file(url).await {
            warn!("Reference {} removed but its image was kept: {}", reference.id, e);
        }
        Ok(())
    }
}
