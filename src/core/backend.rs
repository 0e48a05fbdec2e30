//! Document store abstraction.
//!
//! [`Backend`] is the seam between the storefront logic and the hosted
//! backend. In the browser it is implemented by [`crate::core::bridge::JsBackend`];
//! tests use an in-memory fake.
//!
//! Queries are plain data ([`StoreQuery`]) serialized as:
//!
//! ```json
//! {
//!   "where": [{ "field": "price", "op": ">=", "value": 100 }],
//!   "orderBy": [{ "field": "price", "direction": "asc" }],
//!   "limit": 50
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::BackendError;
use crate::models::Session;

// =============================================================================
// Query Model
// =============================================================================

/// Comparison operators the store evaluates server-side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "array-contains-any")]
    ArrayContainsAny,
}

impl Op {
    /// Range operators force the first ordering key onto their field.
    pub fn is_range(self) -> bool {
        matches!(self, Self::Gte | Self::Lte)
    }
}

/// One `where` clause.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Constraint {
    pub field: &'static str,
    pub op: Op,
    pub value: Value,
}

impl Constraint {
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            op: Op::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            op: Op::Gte,
            value: value.into(),
        }
    }

    pub fn lte(field: &'static str, value: impl Into<Value>) -> Self {
        Self {
            field,
            op: Op::Lte,
            value: value.into(),
        }
    }

    pub fn contains_any<I, S>(field: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            op: Op::ArrayContainsAny,
            value: Value::Array(
                values
                    .into_iter()
                    .map(|v| Value::String(v.into()))
                    .collect(),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: Direction,
}

/// A collection query: conjunctive constraints, ordering keys, optional cap.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StoreQuery {
    #[serde(rename = "where")]
    pub constraints: Vec<Constraint>,
    #[serde(rename = "orderBy")]
    pub order_by: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn order_by(mut self, field: &'static str, direction: Direction) -> Self {
        self.order_by.push(OrderBy { field, direction });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Field carrying a range constraint, if any.
    pub fn ranged_field(&self) -> Option<&'static str> {
        self.constraints
            .iter()
            .find(|c| c.op.is_range())
            .map(|c| c.field)
    }
}

/// A stored document: its id plus the decoded body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Document<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Document store, object storage, auth session and callable functions.
///
/// All futures run on the single browser thread, so implementations are
/// free to hold `Rc`/`RefCell` state.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Resolves once the connection has finished initializing.
    ///
    /// Callers await this instead of polling; it resolves at most once and
    /// every later call returns immediately.
    async fn ready(&self) -> Result<(), BackendError>;

    async fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &StoreQuery,
    ) -> Result<Vec<Document<T>>, BackendError>;

    async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, BackendError>;

    /// Insert a document and return its generated id.
    async fn add(&self, collection: &str, data: &Value) -> Result<String, BackendError>;

    /// Merge `data` into an existing document.
    async fn update(&self, collection: &str, id: &str, data: &Value) -> Result<(), BackendError>;

    async fn remove(&self, collection: &str, id: &str) -> Result<(), BackendError>;

    /// Invoke a named server-side callable.
    async fn call(&self, name: &str, data: &Value) -> Result<Value, BackendError>;

    /// Store `bytes` under `path` in object storage and return its download URL.
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, BackendError>;

    /// Delete a stored object by its download URL.
    async fn delete_file(&self, url: &str) -> Result<(), BackendError>;

    /// Currently signed-in user, if any.
    fn current_user(&self) -> Option<Session>;

    /// E-mail and password sign-in.
    ///
    /// On success the new user is visible through [`Backend::current_user`]
    /// and any auth-change subscription.
    async fn sign_in_email(&self, email: &str, password: &str) -> Result<(), BackendError>;

    /// Sign in through the hosted identity provider's popup.
    async fn sign_in_google(&self) -> Result<(), BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_wire_shape() {
        let query = StoreQuery::new()
            .filter(Constraint::eq("available", true))
            .filter(Constraint::gte("price", 100.0))
            .order_by("price", Direction::Asc)
            .limit(50);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "where": [
                    { "field": "available", "op": "==", "value": true },
                    { "field": "price", "op": ">=", "value": 100.0 }
                ],
                "orderBy": [{ "field": "price", "direction": "asc" }],
                "limit": 50
            })
        );
    }

    #[test]
    fn test_unlimited_query_omits_limit() {
        let value = serde_json::to_value(StoreQuery::new()).unwrap();
        assert!(value.get("limit").is_none());
    }

    #[test]
    fn test_contains_any_value() {
        let c = Constraint::contains_any("tags", ["a", "b"]);
        assert_eq!(c.op, Op::ArrayContainsAny);
        assert_eq!(c.value, json!(["a", "b"]));
    }

    #[test]
    fn test_ranged_field() {
        let query = StoreQuery::new()
            .filter(Constraint::eq("available", true))
            .filter(Constraint::lte("price", 300.0));
        assert_eq!(query.ranged_field(), Some("price"));
        assert_eq!(StoreQuery::new().ranged_field(), None);
    }

    #[test]
    fn test_document_flattens_body() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Body {
            name: String,
        }
        let doc: Document<Body> =
            serde_json::from_value(json!({ "id": "u1", "name": "Ana" })).unwrap();
        assert_eq!(doc.id, "u1");
        assert_eq!(doc.data.name, "Ana");
    }
}
