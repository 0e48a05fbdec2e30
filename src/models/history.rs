//! State bag attached to browser history entries.

use serde::{Deserialize, Serialize};

use super::SellerScope;

/// Data stored in `history.state` for an entry.
///
/// In-app seller cards attach the seller identity so the profile page can be
/// shown without a directory lookup. A direct URL load carries an empty bag
/// and must still resolve through the seller directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_slug: Option<String>,
}

impl HistoryState {
    /// State attached when following a seller card.
    pub fn for_seller(scope: &SellerScope) -> Self {
        Self {
            seller_id: Some(scope.seller_id.clone()),
            seller_name: Some(scope.seller_name.clone()),
            seller_slug: Some(scope.slug.clone()),
        }
    }

    /// Seller identity embedded in this entry, if complete.
    ///
    /// `url_slug` fills in a missing slug. A name is required: without it the
    /// scoped header cannot be rendered and the directory must be consulted.
    pub fn seller_scope(&self, url_slug: &str) -> Option<SellerScope> {
        let seller_id = self.seller_id.as_ref().filter(|id| !id.is_empty())?;
        let seller_name = self.seller_name.as_ref().filter(|n| !n.is_empty())?;
        Some(SellerScope {
            slug: self
                .seller_slug
                .clone()
                .unwrap_or_else(|| url_slug.to_string()),
            seller_id: seller_id.clone(),
            seller_name: seller_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let state = HistoryState::default();
        assert_eq!(state.seller_scope("ana"), None);
    }

    #[test]
    fn test_scope_from_state_uses_url_slug_as_fallback() {
        let state = HistoryState {
            seller_id: Some("u1".to_string()),
            seller_name: Some("Ana".to_string()),
            seller_slug: None,
        };
        let scope = state.seller_scope("ana").unwrap();
        assert_eq!(scope.slug, "ana");
        assert_eq!(scope.seller_id, "u1");
        assert_eq!(scope.seller_name, "Ana");
    }

    #[test]
    fn test_scope_requires_name() {
        let state = HistoryState {
            seller_id: Some("u1".to_string()),
            seller_name: None,
            seller_slug: Some("ana".to_string()),
        };
        assert_eq!(state.seller_scope("ana"), None);
    }

    #[test]
    fn test_serializes_camel_case_without_nulls() {
        let state = HistoryState {
            seller_id: Some("u1".to_string()),
            seller_name: None,
            seller_slug: Some("ana".to_string()),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, serde_json::json!({"sellerId": "u1", "sellerSlug": "ana"}));
    }

    #[test]
    fn test_equality_is_by_value() {
        let scope = SellerScope {
            slug: "ana".to_string(),
            seller_id: "u1".to_string(),
            seller_name: "Ana".to_string(),
        };
        assert_eq!(HistoryState::for_seller(&scope), HistoryState::for_seller(&scope));
        assert_ne!(HistoryState::for_seller(&scope), HistoryState::default());
    }
}
