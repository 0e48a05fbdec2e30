//! Seller directory: URL slug to seller identity.
//!
//! Resolution order for a slug:
//!
//! 1. Session cache (append-only, keyed by slug)
//! 2. One remote equality query on the stored `slug` field
//! 3. Legacy index of sellers that never stored a slug, keyed by their
//!    derived slug (or id when the name yields none)
//!
//! Concurrent resolutions of the same slug share one lookup. Negative
//! results are not cached, so a seller created mid-session with a stored
//! slug becomes reachable on the next attempt. The legacy index is built
//! at most once per session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture, Shared};

use crate::config::backend::{SELLER_ROLE, USERS};
use crate::core::backend::{Backend, Constraint, Direction, Document, StoreQuery};
use crate::core::error::BackendError;
use crate::models::{SellerDirectoryEntry, SellerRecord};

type LookupResult = Result<Option<SellerDirectoryEntry>, BackendError>;
type Lookup = Shared<LocalBoxFuture<'static, LookupResult>>;

/// Sellers without a stored slug, keyed by their public slug.
type LegacyIndex = Rc<HashMap<String, SellerDirectoryEntry>>;
type LegacyLoad = Shared<LocalBoxFuture<'static, Result<LegacyIndex, BackendError>>>;

/// Slot shared with in-flight lookups; emptied again when the build fails.
type LegacySlot = Rc<RefCell<Option<LegacyLoad>>>;

pub struct SellerDirectory<B> {
    backend: Rc<B>,
    cache: RefCell<HashMap<String, SellerDirectoryEntry>>,
    in_flight: RefCell<HashMap<String, Lookup>>,
    legacy: LegacySlot,
}

impl<B: Backend + 'static> SellerDirectory<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            cache: RefCell::new(HashMap::new()),
            in_flight: RefCell::new(HashMap::new()),
            legacy: Rc::new(RefCell::new(None)),
        }
    }

    pub fn cached(&self, slug: &str) -> Option<SellerDirectoryEntry> {
        self.cache.borrow().get(slug).cloned()
    }

    /// Seed the cache with an identity learned elsewhere.
    ///
    /// Existing entries are kept.
    pub fn prime(&self, entry: SellerDirectoryEntry) {
        self.cache
            .borrow_mut()
            .entry(entry.slug.clone())
            .or_insert(entry);
    }

    /// Resolve a slug to a seller identity.
    ///
    /// Returns `Ok(None)` when no seller matches.
    pub async fn resolve(&self, slug: &str) -> LookupResult {
        if let Some(hit) = self.cached(slug) {
            return Ok(Some(hit));
        }

        let lookup = self.lookup_for(slug);
        let result = lookup.clone().await;

        {
            let mut in_flight = self.in_flight.borrow_mut();
            if in_flight.get(slug).is_some_and(|l| l.ptr_eq(&lookup)) {
                in_flight.remove(slug);
            }
        }

        if let Ok(Some(entry)) = &result {
            self.prime(entry.clone());
        }
        result
    }

    /// Join the outstanding lookup for `slug`, or start one.
    fn lookup_for(&self, slug: &str) -> Lookup {
        if let Some(pending) = self.in_flight.borrow().get(slug) {
            return pending.clone();
        }

        let backend = Rc::clone(&self.backend);
        let legacy = Rc::clone(&self.legacy);
        let wanted = slug.to_string();
        let lookup = async move { find_seller(backend, legacy, &wanted).await }
            .boxed_local()
            .shared();

        self.in_flight
            .borrow_mut()
            .insert(slug.to_string(), lookup.clone());
        lookup
    }

    /// All sellers ordered by name, for the seller gallery.
    ///
    /// Every listed seller is primed into the cache, and the legacy index
    /// is filled from the same rows when it has not been built yet.
    pub async fn list_sellers(&self) -> Result<Vec<Document<SellerRecord>>, BackendError> {
        let sellers = list_sellers(self.backend.as_ref()).await?;
        for doc in &sellers {
            self.prime(doc.data.to_scope(&doc.id));
        }

        let mut slot = self.legacy.borrow_mut();
        if slot.is_none() {
            let index = legacy_index(&sellers);
            let ready = future::ready(Ok::<_, BackendError>(index));
            *slot = Some(ready.boxed_local().shared());
        }
        Ok(sellers)
    }
}

async fn list_sellers<B: Backend>(backend: &B) -> Result<Vec<Document<SellerRecord>>, BackendError> {
    backend.ready().await?;
    let query = StoreQuery::new()
        .filter(Constraint::eq("role", SELLER_ROLE))
        .order_by("name", Direction::Asc);
    backend.query(USERS, &query).await
}

fn legacy_index(sellers: &[Document<SellerRecord>]) -> LegacyIndex {
    let mut index = HashMap::new();
    for doc in sellers.iter().filter(|doc| doc.data.stored_slug().is_none()) {
        let entry = doc.data.to_scope(&doc.id);
        index.entry(entry.slug.clone()).or_insert(entry);
    }
    Rc::new(index)
}

/// The session's legacy index, scanning the sellers on first use.
async fn load_legacy<B: Backend + 'static>(
    backend: Rc<B>,
    slot: LegacySlot,
) -> Result<LegacyIndex, BackendError> {
    let load = slot
        .borrow_mut()
        .get_or_insert_with(|| {
            async move { list_sellers(backend.as_ref()).await.map(|s| legacy_index(&s)) }
                .boxed_local()
                .shared()
        })
        .clone();

    let result = load.clone().await;
    if result.is_err() {
        let mut slot = slot.borrow_mut();
        if slot.as_ref().is_some_and(|l| l.ptr_eq(&load)) {
            *slot = None;
        }
    }
    result
}

async fn find_seller<B: Backend + 'static>(
    backend: Rc<B>,
    legacy: LegacySlot,
    slug: &str,
) -> LookupResult {
    backend.ready().await?;

    let query = StoreQuery::new()
        .filter(Constraint::eq("slug", slug))
        .filter(Constraint::eq("role", SELLER_ROLE))
        .limit(1);
    let found = backend.query::<SellerRecord>(USERS, &query).await?;
    if let Some(doc) = found.into_iter().next() {
        return Ok(Some(doc.data.to_scope(&doc.id)));
    }

    // Derived slugs are lower-case; id fallbacks are matched verbatim
    let index = load_legacy(backend, legacy).await?;
    let entry = index
        .get(&slug.to_lowercase())
        .or_else(|| index.get(slug))
        .cloned();
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeBackend, seller};
    use crate::models::SellerScope;
    use std::pin::pin;
    use std::task::Poll;

    fn directory(backend: FakeBackend) -> (Rc<FakeBackend>, SellerDirectory<FakeBackend>) {
        let backend = Rc::new(backend);
        let directory = SellerDirectory::new(Rc::clone(&backend));
        (backend, directory)
    }

    fn scope(slug: &str, id: &str, name: &str) -> SellerScope {
        SellerScope {
            slug: slug.to_string(),
            seller_id: id.to_string(),
            seller_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_backend() {
        let (backend, directory) = directory(FakeBackend::new());
        directory.prime(scope("ana", "u1", "Ana"));

        let entry = directory.resolve("ana").await.unwrap();
        assert_eq!(entry, Some(scope("ana", "u1", "Ana")));
        assert_eq!(backend.query_count(), 0);
    }

    #[tokio::test]
    async fn test_stored_slug_is_cached_after_first_lookup() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "u1", seller("João's Store", Some("joaos-store")));

        let first = directory.resolve("joaos-store").await.unwrap();
        assert_eq!(first, Some(scope("joaos-store", "u1", "João's Store")));
        assert_eq!(backend.query_count(), 1);

        let second = directory.resolve("joaos-store").await.unwrap();
        assert_eq!(second, first);
        assert_eq!(backend.query_count(), 1);
    }

    #[tokio::test]
    async fn test_derived_slug_fallback() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "u1", seller("Loja do Zé", None));
        backend.insert(USERS, "u2", seller("Ana", Some("ana")));

        let entry = directory.resolve("loja-do-ze").await.unwrap();
        assert_eq!(entry, Some(scope("loja-do-ze", "u1", "Loja do Zé")));
        assert_eq!(backend.query_count(), 2);
        assert!(directory.cached("loja-do-ze").is_some());
    }

    #[tokio::test]
    async fn test_stored_slug_wins_over_derived() {
        let (backend, directory) = directory(FakeBackend::new());
        // Renamed seller: the stored slug no longer matches the name
        backend.insert(USERS, "u1", seller("Ana Paula", Some("ana")));

        assert_eq!(directory.resolve("ana-paula").await.unwrap(), None);
        assert!(directory.resolve("ana").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_non_sellers_are_ignored() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(
            USERS,
            "a1",
            serde_json::json!({ "name": "Admin", "slug": "admin", "role": "admin" }),
        );
        assert_eq!(directory.resolve("admin").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let (backend, directory) = directory(FakeBackend::new());

        assert_eq!(directory.resolve("ghost").await.unwrap(), None);
        assert_eq!(backend.query_count(), 2);

        backend.insert(USERS, "u9", seller("Ghost", Some("ghost")));
        assert!(directory.resolve("ghost").await.unwrap().is_some());
        assert_eq!(backend.query_count(), 3);
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.fail_next_query("unavailable");

        assert!(directory.resolve("ana").await.is_err());
        assert!(directory.cached("ana").is_none());
    }

    #[tokio::test]
    async fn test_concurrent_resolves_share_one_lookup() {
        let (backend, ready) = FakeBackend::gated();
        let (backend, directory) = directory(backend);
        backend.insert(USERS, "u1", seller("Ana", Some("ana")));

        let (a, b, _) = futures::join!(directory.resolve("ana"), directory.resolve("ana"), async {
            let _ = ready.send(());
        });

        assert_eq!(a.unwrap(), Some(scope("ana", "u1", "Ana")));
        assert_eq!(b.unwrap(), Some(scope("ana", "u1", "Ana")));
        assert_eq!(backend.query_count(), 1);
    }

    #[tokio::test]
    async fn test_waits_for_readiness_without_querying() {
        let (backend, ready) = FakeBackend::gated();
        let (backend, directory) = directory(backend);
        backend.insert(USERS, "u1", seller("Ana", Some("ana")));

        let mut pending = pin!(directory.resolve("ana"));
        assert!(matches!(futures::poll!(pending.as_mut()), Poll::Pending));
        assert_eq!(backend.query_count(), 0);

        ready.send(()).unwrap();
        assert!(pending.await.unwrap().is_some());
        assert_eq!(backend.query_count(), 1);
    }

    #[tokio::test]
    async fn test_list_sellers_primes_cache() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "u2", seller("Zed", Some("zed")));
        backend.insert(USERS, "u1", seller("Ana", None));

        let sellers = directory.list_sellers().await.unwrap();
        let names: Vec<_> = sellers.iter().map(|d| d.data.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Zed"]);

        let queries = backend.query_count();
        assert!(directory.resolve("ana").await.unwrap().is_some());
        assert_eq!(backend.query_count(), queries);
    }

    #[tokio::test]
    async fn test_repeated_misses_scan_sellers_once() {
        let (backend, directory) = directory(FakeBackend::new());
        for i in 0..20 {
            backend.insert(USERS, &format!("u{}", i), seller(&format!("Seller {}", i), None));
        }

        for _ in 0..3 {
            assert_eq!(directory.resolve("typo").await.unwrap(), None);
        }

        let queries = backend.queries();
        assert_eq!(queries.len(), 4);
        let unbounded = queries.iter().filter(|(_, q)| q.limit.is_none()).count();
        assert_eq!(unbounded, 1);
        assert!(directory.resolve("seller-7").await.unwrap().is_some());
        assert_eq!(backend.query_count(), 5);
    }

    #[tokio::test]
    async fn test_gallery_listing_fills_legacy_index() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "u1", seller("Ana", None));
        directory.list_sellers().await.unwrap();

        assert_eq!(directory.resolve("nobody").await.unwrap(), None);
        assert_eq!(backend.query_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_index_build_is_retried() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "u1", seller("Loja do Zé", None));
        backend.fail_query_at(1, "unavailable");

        assert!(directory.resolve("loja-do-ze").await.is_err());
        assert!(directory.resolve("loja-do-ze").await.unwrap().is_some());
        assert_eq!(backend.query_count(), 4);
    }

    #[tokio::test]
    async fn test_derived_match_ignores_url_case() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "u1", seller("João's Store", None));

        let entry = directory.resolve("Joaos-Store").await.unwrap();
        assert_eq!(entry, Some(scope("joaos-store", "u1", "João's Store")));
    }

    #[tokio::test]
    async fn test_unsluggable_name_resolves_by_id() {
        let (backend, directory) = directory(FakeBackend::new());
        backend.insert(USERS, "Xy7", seller("!!!", None));

        let sellers = directory.list_sellers().await.unwrap();
        let slug = sellers[0].data.to_scope(&sellers[0].id).slug;
        assert_eq!(slug, "Xy7");

        let fresh = SellerDirectory::new(Rc::clone(&backend));
        assert_eq!(
            fresh.resolve(&slug).await.unwrap(),
            Some(scope("Xy7", "Xy7", "!!!"))
        );
    }
}
