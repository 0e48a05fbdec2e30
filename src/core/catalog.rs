//! Catalog query composition and render passes.
//!
//! The store can only answer "tags contain any of N values", so a tag
//! filter is sent as `array-contains-any` over the first
//! [`MAX_ARRAY_MEMBERSHIP`] tags and then narrowed client-side by
//! [`PostFilter`] to products carrying every requested tag.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use leptos::logging::{error, warn};

use crate::config::backend::{PRODUCTS, USERS};
use crate::config::catalog::{MAX_ARRAY_MEMBERSHIP, PAGE_SIZE};
use crate::core::backend::{Backend, Constraint, Direction, StoreQuery};
use crate::core::error::QueryError;
use crate::core::filter::FilterChange;
use crate::core::generation::{Generation, Ticket};
use crate::models::{CatalogItem, Filter, Product, SellerContact, SellerRecord};

// =============================================================================
// Composition
// =============================================================================

/// Client-side checks applied after the remote fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostFilter {
    /// Every one of these must be present on the product.
    pub required_tags: BTreeSet<String>,
    pub seller_id: Option<String>,
}

impl PostFilter {
    pub fn accepts(&self, product: &Product) -> bool {
        let seller_ok = self
            .seller_id
            .as_deref()
            .is_none_or(|id| product.seller_id.as_deref() == Some(id));
        seller_ok && self.required_tags.iter().all(|tag| product.has_tag(tag))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogQuery {
    pub query: StoreQuery,
    pub post_filter: PostFilter,
}

/// Build the remote query and post-filter for a filter change.
pub fn compose(change: &FilterChange) -> CatalogQuery {
    let mut query = StoreQuery::new().filter(Constraint::eq("available", true));
    let mut post_filter = PostFilter::default();

    let seller_id = change
        .seller_scope
        .as_deref()
        .or_else(|| change.filter.seller_id());
    if let Some(id) = seller_id {
        query = query.filter(Constraint::eq("sellerId", id));
        post_filter.seller_id = Some(id.to_string());
    }

    query = match &change.filter {
        Filter::Price(range) => {
            if range.min > 0.0 {
                query = query.filter(Constraint::gte("price", range.min));
            }
            if let Some(max) = range.finite_max() {
                query = query.filter(Constraint::lte("price", max));
            }
            // Range filters require the ranged field as first ordering key
            query.order_by("price", Direction::Asc)
        }
        Filter::Items(tags) if !tags.is_empty() => {
            post_filter.required_tags = tags.clone();
            query
                .filter(Constraint::contains_any(
                    "tags",
                    tags.iter().take(MAX_ARRAY_MEMBERSHIP).cloned(),
                ))
                .order_by("createdAt", Direction::Desc)
        }
        _ => query.order_by("createdAt", Direction::Desc),
    };

    CatalogQuery {
        query: query.limit(PAGE_SIZE),
        post_filter,
    }
}

// =============================================================================
// Render Pass
// =============================================================================

/// Result of one catalog load.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogOutcome {
    Loaded(Vec<CatalogItem>),
    Failed(QueryError),
    /// A newer load started before this one finished.
    Superseded,
}

/// Loads and enriches product lists for the storefront grid.
pub struct Catalog<B> {
    backend: Rc<B>,
    generation: Generation,
}

impl<B: Backend> Catalog<B> {
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            generation: Generation::new(),
        }
    }

    /// Fetch, post-filter and enrich the products matching `change`.
    ///
    /// Starting a load supersedes every load still in flight.
    pub async fn load(&self, change: &FilterChange) -> CatalogOutcome {
        let ticket = self.generation.advance();
        match self.fetch(change, &ticket).await {
            _ if !ticket.is_current() => CatalogOutcome::Superseded,
            Ok(items) => CatalogOutcome::Loaded(items),
            Err(err) => {
                error!("Catalog query failed: {}", err);
                CatalogOutcome::Failed(err)
            }
        }
    }

    async fn fetch(
        &self,
        change: &FilterChange,
        ticket: &Ticket,
    ) -> Result<Vec<CatalogItem>, QueryError> {
        let CatalogQuery { query, post_filter } = compose(change);

        self.backend
            .ready()
            .await
            .map_err(|e| QueryError::from_backend(&e))?;
        let docs = self
            .backend
            .query::<Product>(PRODUCTS, &query)
            .await
            .map_err(|e| QueryError::from_backend(&e))?;

        // One seller lookup per distinct seller in this pass
        let mut sellers: HashMap<String, SellerContact> = HashMap::new();
        let mut items = Vec::with_capacity(docs.len());

        for doc in docs {
            if !post_filter.accepts(&doc.data) {
                continue;
            }
            if !ticket.is_current() {
                break;
            }

            let seller = match doc.data.seller_id.as_deref() {
                Some(id) => match sellers.get(id) {
                    Some(contact) => contact.clone(),
                    None => {
                        let contact = self.seller_contact(id).await;
                        sellers.insert(id.to_string(), contact.clone());
                        contact
                    }
                },
                None => SellerContact::unknown(),
            };

            items.push(CatalogItem {
                id: doc.id,
                product: doc.data,
                seller,
            });
        }

        Ok(items)
    }

    async fn seller_contact(&self, seller_id: &str) -> SellerContact {
        match self.backend.get::<SellerRecord>(USERS, seller_id).await {
            Ok(Some(record)) => record.contact(),
            Ok(None) => SellerContact::unknown(),
            Err(e) => {
                warn!("Seller {} unavailable: {}", seller_id, e);
                SellerContact::unknown()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::Op;
    use crate::core::testing::{FakeBackend, product, seller};
    use crate::models::PriceRange;
    use serde_json::json;

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn change(filter: Filter) -> FilterChange {
        FilterChange {
            filter,
            seller_scope: None,
        }
    }

    fn ids(outcome: &CatalogOutcome) -> Vec<&str> {
        match outcome {
            CatalogOutcome::Loaded(items) => items.iter().map(|i| i.id.as_str()).collect(),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_default_query() {
        let composed = compose(&FilterChange::all());
        assert_eq!(
            composed.query,
            StoreQuery::new()
                .filter(Constraint::eq("available", true))
                .order_by("createdAt", Direction::Desc)
                .limit(PAGE_SIZE)
        );
        assert_eq!(composed.post_filter, PostFilter::default());
    }

    #[test]
    fn test_price_orders_by_price() {
        let composed = compose(&change(Filter::Price(PriceRange::new(100.0, Some(300.0)))));
        let q = &composed.query;
        assert_eq!(q.order_by[0].field, "price");
        assert_eq!(q.order_by[0].direction, Direction::Asc);
        assert_eq!(q.ranged_field(), Some("price"));
        assert_eq!(q.constraints.len(), 3);
    }

    #[test]
    fn test_price_bounds_are_optional() {
        let open = compose(&change(Filter::Price(PriceRange::new(800.0, None))));
        let ops: Vec<Op> = open.query.constraints.iter().map(|c| c.op).collect();
        assert_eq!(ops, [Op::Eq, Op::Gte]);

        let from_zero = compose(&change(Filter::Price(PriceRange::new(0.0, Some(100.0)))));
        let ops: Vec<Op> = from_zero.query.constraints.iter().map(|c| c.op).collect();
        assert_eq!(ops, [Op::Eq, Op::Lte]);
        assert_eq!(from_zero.query.order_by[0].field, "price");
    }

    #[test]
    fn test_tag_query_caps_membership_values() {
        let many: BTreeSet<String> = (0..12).map(|i| format!("tag{:02}", i)).collect();
        let composed = compose(&change(Filter::Items(many.clone())));

        let membership = composed
            .query
            .constraints
            .iter()
            .find(|c| c.op == Op::ArrayContainsAny)
            .unwrap();
        assert_eq!(membership.value.as_array().unwrap().len(), MAX_ARRAY_MEMBERSHIP);
        assert_eq!(composed.post_filter.required_tags, many);
        assert_eq!(composed.query.order_by[0].field, "createdAt");
    }

    #[test]
    fn test_seller_scope_adds_equality() {
        let composed = compose(&FilterChange::for_seller("u1"));
        assert!(composed
            .query
            .constraints
            .contains(&Constraint::eq("sellerId", "u1")));
        assert_eq!(composed.post_filter.seller_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_post_filter_requires_every_tag() {
        let filter = PostFilter {
            required_tags: tags(&["sword", "shield"]),
            seller_id: None,
        };
        let mut p = Product {
            tags: vec!["sword".into(), "shield".into(), "bow".into()],
            ..Default::default()
        };
        assert!(filter.accepts(&p));
        p.tags = vec!["sword".into()];
        assert!(!filter.accepts(&p));
    }

    #[tokio::test]
    async fn test_tag_scenario_excludes_partial_match() {
        let backend = Rc::new(FakeBackend::new());
        backend.insert(USERS, "s1", seller("Ana", Some("ana")));
        backend.insert(PRODUCTS, "full", product("Full", 50.0, &["sword", "shield", "mount"], "s1", 3.0));
        backend.insert(PRODUCTS, "partial", product("Partial", 40.0, &["sword", "shield"], "s1", 2.0));
        backend.insert(PRODUCTS, "other", product("Other", 30.0, &["bow"], "s1", 1.0));

        let catalog = Catalog::new(Rc::clone(&backend));
        let outcome = catalog
            .load(&change(Filter::Items(tags(&["sword", "shield", "mount"]))))
            .await;
        assert_eq!(ids(&outcome), ["full"]);
    }

    #[tokio::test]
    async fn test_price_results_sorted_by_price() {
        let backend = Rc::new(FakeBackend::new());
        backend.insert(PRODUCTS, "a", product("A", 250.0, &[], "s1", 1.0));
        backend.insert(PRODUCTS, "b", product("B", 120.0, &[], "s1", 2.0));
        backend.insert(PRODUCTS, "c", product("C", 900.0, &[], "s1", 3.0));

        let catalog = Catalog::new(Rc::clone(&backend));
        let outcome = catalog
            .load(&change(Filter::Price(PriceRange::new(100.0, Some(300.0)))))
            .await;
        assert_eq!(ids(&outcome), ["b", "a"]);
    }

    #[tokio::test]
    async fn test_unavailable_products_hidden() {
        let backend = Rc::new(FakeBackend::new());
        let mut sold = product("Sold", 10.0, &[], "s1", 1.0);
        sold["available"] = json!(false);
        backend.insert(PRODUCTS, "sold", sold);
        backend.insert(PRODUCTS, "live", product("Live", 10.0, &[], "s1", 2.0));

        let catalog = Catalog::new(Rc::clone(&backend));
        assert_eq!(ids(&catalog.load(&FilterChange::all()).await), ["live"]);
    }

    #[tokio::test]
    async fn test_enrichment_looks_up_each_seller_once() {
        let backend = Rc::new(FakeBackend::new());
        backend.insert(USERS, "s1", seller("Ana", Some("ana")));
        for i in 0..3 {
            backend.insert(PRODUCTS, &format!("p{}", i), product("P", 10.0, &[], "s1", i as f64));
        }
        backend.insert(PRODUCTS, "orphan", product("O", 10.0, &[], "missing", 9.0));

        let catalog = Catalog::new(Rc::clone(&backend));
        let CatalogOutcome::Loaded(items) = catalog.load(&FilterChange::all()).await else {
            panic!("expected items");
        };
        assert_eq!(backend.get_count(), 2);
        assert_eq!(items[0].seller, SellerContact::unknown());
        assert_eq!(items[1].seller.name, "Ana");
        assert_eq!(items[1].seller.whatsapp.as_deref(), Some("5511999990000"));
    }

    #[tokio::test]
    async fn test_failed_seller_lookup_degrades() {
        let backend = Rc::new(FakeBackend::new());
        backend.insert(PRODUCTS, "p1", product("P", 10.0, &[], "s1", 1.0));
        backend.fail_gets();

        let catalog = Catalog::new(Rc::clone(&backend));
        let CatalogOutcome::Loaded(items) = catalog.load(&FilterChange::all()).await else {
            panic!("expected items");
        };
        assert_eq!(items[0].seller, SellerContact::unknown());
    }

    #[tokio::test]
    async fn test_query_errors_are_classified() {
        let backend = Rc::new(FakeBackend::new());
        backend.fail_next_query("The query requires an index: https://console.example.com/x");

        let catalog = Catalog::new(Rc::clone(&backend));
        assert_eq!(
            catalog.load(&FilterChange::all()).await,
            CatalogOutcome::Failed(QueryError::MissingIndex {
                link: "https://console.example.com/x".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_stale_load_is_superseded() {
        let (backend, ready) = FakeBackend::gated();
        let backend = Rc::new(backend);
        backend.insert(PRODUCTS, "p1", product("P", 10.0, &[], "s1", 1.0));
        let catalog = Catalog::new(Rc::clone(&backend));

        let everything = FilterChange::all();
        let scoped = FilterChange::for_seller("s1");
        let (old, new, _) = futures::join!(
            catalog.load(&everything),
            catalog.load(&scoped),
            async {
                let _ = ready.send(());
            }
        );
        assert_eq!(old, CatalogOutcome::Superseded);
        assert_eq!(ids(&new), ["p1"]);
    }
}
