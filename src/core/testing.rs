//! In-memory test doubles for [`Backend`] and [`History`].

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::Shared;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::core::backend::{Backend, Direction, Document, Op, StoreQuery};
use crate::core::error::BackendError;
use crate::core::history::History;
use crate::models::{HistoryState, Session};

// =============================================================================
// FakeBackend
// =============================================================================

/// Document store that evaluates [`StoreQuery`] in memory.
///
/// Mirrors the hosted store's restrictions that matter to the catalog:
/// at most 10 `array-contains-any` values, and a range filter must be on
/// the first ordering key.
#[derive(Default)]
pub struct FakeBackend {
    collections: RefCell<HashMap<String, BTreeMap<String, Value>>>,
    queries: RefCell<Vec<(String, StoreQuery)>>,
    gets: Cell<usize>,
    calls: RefCell<Vec<(String, Value)>>,
    call_results: RefCell<HashMap<String, Result<Value, BackendError>>>,
    query_failure: RefCell<Option<BackendError>>,
    numbered_failure: RefCell<Option<(usize, BackendError)>>,
    fail_gets: Cell<bool>,
    gate: Option<Shared<oneshot::Receiver<()>>>,
    session: RefCell<Option<Session>>,
    accounts: RefCell<HashMap<String, (String, Session)>>,
    provider_account: RefCell<Option<Session>>,
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    fail_file_deletes: Cell<bool>,
    next_id: Cell<u64>,
}

/// Download URL the fake hands out for an uploaded path.
pub fn storage_url(path: &str) -> String {
    format!("https://storage.test/{}", path)
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose `ready()` stays pending until the sender fires.
    pub fn gated() -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let backend = Self {
            gate: Some(rx.shared()),
            ..Self::default()
        };
        (backend, tx)
    }

    pub fn insert(&self, collection: &str, id: &str, data: Value) {
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
    }

    pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .borrow()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .borrow()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }

    pub fn queries(&self) -> Vec<(String, StoreQuery)> {
        self.queries.borrow().clone()
    }

    pub fn get_count(&self) -> usize {
        self.gets.get()
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    /// Make the next query fail with `message`.
    pub fn fail_next_query(&self, message: &str) {
        *self.query_failure.borrow_mut() = Some(BackendError::remote(message));
    }

    /// Make the query with zero-based ordinal `n` fail with `message`.
    pub fn fail_query_at(&self, n: usize, message: &str) {
        *self.numbered_failure.borrow_mut() = Some((n, BackendError::remote(message)));
    }

    pub fn fail_gets(&self) {
        self.fail_gets.set(true);
    }

    pub fn respond_to_call(&self, name: &str, result: Result<Value, BackendError>) {
        self.call_results
            .borrow_mut()
            .insert(name.to_string(), result);
    }

    pub fn sign_in(&self, session: Session) {
        *self.session.borrow_mut() = Some(session);
    }

    /// Register e-mail credentials that `sign_in_email` accepts.
    pub fn add_account(&self, email: &str, password: &str, session: Session) {
        self.accounts
            .borrow_mut()
            .insert(email.to_string(), (password.to_string(), session));
    }

    /// Account the provider popup signs in; without one the popup is closed.
    pub fn set_provider_account(&self, session: Session) {
        *self.provider_account.borrow_mut() = Some(session);
    }

    pub fn file(&self, url: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(url).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn fail_file_deletes(&self) {
        self.fail_file_deletes.set(true);
    }

    fn decode<T: DeserializeOwned>(id: &str, data: &Value) -> Result<Document<T>, BackendError> {
        let mut body = data.clone();
        if let Value::Object(map) = &mut body {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }
        serde_json::from_value(body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

fn check_restrictions(query: &StoreQuery) -> Result<(), BackendError> {
    for constraint in &query.constraints {
        if constraint.op == Op::ArrayContainsAny
            && constraint.value.as_array().map_or(0, Vec::len) > 10
        {
            return Err(BackendError::remote(
                "'array-contains-any' filters support a maximum 10 elements in the value array",
            ));
        }
    }
    if let Some(field) = query.ranged_field() {
        if let Some(first) = query.order_by.first() {
            if first.field != field {
                return Err(BackendError::remote(format!(
                    "Invalid query. You have an inequality filter on '{}' so the first orderBy must be on the same field",
                    field
                )));
            }
        }
    }
    Ok(())
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn satisfies(doc: &Value, query: &StoreQuery) -> bool {
    query.constraints.iter().all(|c| {
        let Some(actual) = doc.get(c.field) else {
            return false;
        };
        match c.op {
            Op::Eq => actual == &c.value,
            Op::Gte => compare(actual, &c.value) != Ordering::Less,
            Op::Lte => compare(actual, &c.value) != Ordering::Greater,
            Op::ArrayContainsAny => match (actual.as_array(), c.value.as_array()) {
                (Some(have), Some(wanted)) => have.iter().any(|v| wanted.contains(v)),
                _ => false,
            },
        }
    }) && query.order_by.iter().all(|o| doc.get(o.field).is_some())
}

impl Backend for FakeBackend {
    async fn ready(&self) -> Result<(), BackendError> {
        if let Some(gate) = &self.gate {
            gate.clone()
                .await
                .map_err(|_| BackendError::remote("backend failed to initialize"))?;
        }
        Ok(())
    }

    async fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &StoreQuery,
    ) -> Result<Vec<Document<T>>, BackendError> {
        self.queries
            .borrow_mut()
            .push((collection.to_string(), query.clone()));

        if let Some(err) = self.query_failure.borrow_mut().take() {
            return Err(err);
        }
        let ordinal = self.queries.borrow().len() - 1;
        let numbered = self
            .numbered_failure
            .borrow_mut()
            .take_if(|(n, _)| *n == ordinal);
        if let Some((_, err)) = numbered {
            return Err(err);
        }
        check_restrictions(query)?;

        let collections = self.collections.borrow();
        let mut rows: Vec<(&String, &Value)> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|(_, d)| satisfies(d, query)).collect())
            .unwrap_or_default();

        rows.sort_by(|(_, a), (_, b)| {
            query
                .order_by
                .iter()
                .map(|o| {
                    let ord = compare(&a[o.field], &b[o.field]);
                    match o.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        rows.into_iter()
            .map(|(id, data)| Self::decode(id, data))
            .collect()
    }

    async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, BackendError> {
        self.gets.set(self.gets.get() + 1);
        if self.fail_gets.get() {
            return Err(BackendError::remote("unavailable"));
        }
        match self.document(collection, id) {
            Some(data) => serde_json::from_value(data)
                .map(Some)
                .map_err(|e| BackendError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    async fn add(&self, collection: &str, data: &Value) -> Result<String, BackendError> {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let id = format!("doc-{}", n);
        self.insert(collection, &id, data.clone());
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, data: &Value) -> Result<(), BackendError> {
        let mut collections = self.collections.borrow_mut();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| BackendError::remote("not-found"))?;
        if let (Value::Object(target), Value::Object(patch)) = (doc, data) {
            for (k, v) in patch {
                target.insert(k.clone(), v.clone());
            }
        }
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<(), BackendError> {
        if let Some(docs) = self.collections.borrow_mut().get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn call(&self, name: &str, data: &Value) -> Result<Value, BackendError> {
        self.calls
            .borrow_mut()
            .push((name.to_string(), data.clone()));
        self.call_results
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "success": true })))
    }

    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, BackendError> {
        let url = storage_url(path);
        self.files.borrow_mut().insert(url.clone(), bytes.to_vec());
        Ok(url)
    }

    async fn delete_file(&self, url: &str) -> Result<(), BackendError> {
        if self.fail_file_deletes.get() {
            return Err(BackendError::Remote {
                code: Some("storage/object-not-found".to_string()),
                message: "No object exists at the desired reference.".to_string(),
            });
        }
        self.files.borrow_mut().remove(url);
        Ok(())
    }

    fn current_user(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    async fn sign_in_email(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let session = match self.accounts.borrow().get(email) {
            Some((expected, session)) if expected == password => session.clone(),
            _ => {
                return Err(BackendError::Remote {
                    code: Some("auth/invalid-credential".to_string()),
                    message: "Firebase: Error (auth/invalid-credential).".to_string(),
                });
            }
        };
        self.sign_in(session);
        Ok(())
    }

    async fn sign_in_google(&self) -> Result<(), BackendError> {
        let Some(session) = self.provider_account.borrow().clone() else {
            return Err(BackendError::Remote {
                code: Some("auth/popup-closed-by-user".to_string()),
                message: "Firebase: Error (auth/popup-closed-by-user).".to_string(),
            });
        };
        self.sign_in(session);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        *self.session.borrow_mut() = None;
        Ok(())
    }
}

// =============================================================================
// MemoryHistory
// =============================================================================

/// Session history kept in a vector, with back/forward.
pub struct MemoryHistory {
    entries: RefCell<Vec<(String, HistoryState)>>,
    index: Cell<usize>,
    pushes: Cell<usize>,
}

impl MemoryHistory {
    pub fn new(initial_path: &str) -> Self {
        Self::with_state(initial_path, HistoryState::default())
    }

    pub fn with_state(initial_path: &str, state: HistoryState) -> Self {
        Self {
            entries: RefCell::new(vec![(initial_path.to_string(), state)]),
            index: Cell::new(0),
            pushes: Cell::new(0),
        }
    }

    pub fn back(&self) {
        self.index.set(self.index.get().saturating_sub(1));
    }

    pub fn forward(&self) {
        let last = self.entries.borrow().len() - 1;
        self.index.set((self.index.get() + 1).min(last));
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn push_count(&self) -> usize {
        self.pushes.get()
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl History for MemoryHistory {
    fn path(&self) -> String {
        self.entries.borrow()[self.index.get()].0.clone()
    }

    fn state(&self) -> HistoryState {
        self.entries.borrow()[self.index.get()].1.clone()
    }

    fn push(&self, path: &str, state: &HistoryState) {
        let mut entries = self.entries.borrow_mut();
        entries.truncate(self.index.get() + 1);
        entries.push((path.to_string(), state.clone()));
        self.index.set(entries.len() - 1);
        self.pushes.set(self.pushes.get() + 1);
    }

    fn replace(&self, path: &str, state: &HistoryState) {
        self.entries.borrow_mut()[self.index.get()] = (path.to_string(), state.clone());
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn seller(name: &str, slug: Option<&str>) -> Value {
    let mut doc = json!({ "name": name, "role": "vendedor", "whatsapp": "5511999990000" });
    if let Some(slug) = slug {
        doc["slug"] = json!(slug);
    }
    doc
}

pub fn product(title: &str, price: f64, tags: &[&str], seller_id: &str, created_at: f64) -> Value {
    json!({
        "title": title,
        "price": price,
        "tags": tags,
        "sellerId": seller_id,
        "available": true,
        "createdAt": created_at,
        "videoUrl": "https://youtu.be/abc",
    })
}

pub fn session(uid: &str, name: &str, role: &str) -> Session {
    serde_json::from_value(json!({
        "uid": uid,
        "name": name,
        "role": role,
        "whatsapp": "5511999990000",
    }))
    .unwrap()
}
