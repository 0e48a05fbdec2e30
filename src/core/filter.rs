//! Active catalog filter and tag picker sessions.
//!
//! [`FilterState`] holds the single active [`Filter`] plus the seller scope
//! of the current page. Every mutation returns the resulting
//! [`FilterChange`], which is what the catalog consumes.
//!
//! Tag picking goes through [`TagPicker`] sessions. Each session is created
//! for one purpose with its own completion handler, so the storefront filter
//! and the dashboard form never share picker state.

use std::collections::BTreeSet;
use std::fmt;

use leptos::logging::warn;

use crate::config::catalog::PRICE_PRESETS;
use crate::models::{Filter, PriceRange};

// =============================================================================
// FilterState
// =============================================================================

/// Notification emitted after every filter mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterChange {
    pub filter: Filter,
    pub seller_scope: Option<String>,
}

impl FilterChange {
    /// The unfiltered catalog.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_seller(seller_id: &str) -> Self {
        Self {
            filter: Filter::Seller(seller_id.to_string()),
            seller_scope: Some(seller_id.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    filter: Filter,
    scope: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn seller_scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Apply a price range. Clears any tag filter.
    pub fn set_price_filter(&mut self, range: PriceRange) -> FilterChange {
        self.filter = Filter::Price(range);
        self.change()
    }

    /// Select a sidebar preset by its value (`"all"`, `"100-300"`, `"800+"`).
    ///
    /// Unparseable values fall back to [`FilterState::clear`].
    pub fn select_price_preset(&mut self, value: &str) -> FilterChange {
        match PriceRange::parse(value) {
            Some(range) => self.set_price_filter(range),
            None => {
                if value != "all" {
                    warn!("Invalid price preset '{}', showing all accounts", value);
                }
                self.clear()
            }
        }
    }

    /// Require every tag in `tags`. Clears any price filter.
    ///
    /// An empty set is the same as [`FilterState::clear`].
    pub fn set_tag_filter<I>(&mut self, tags: I) -> FilterChange
    where
        I: IntoIterator<Item = String>,
    {
        let tags: BTreeSet<String> = tags.into_iter().collect();
        if tags.is_empty() {
            return self.clear();
        }
        self.filter = Filter::Items(tags);
        self.change()
    }

    /// Drop price and tag filters, keeping any seller scope.
    pub fn clear(&mut self) -> FilterChange {
        self.filter = match &self.scope {
            Some(id) => Filter::Seller(id.clone()),
            None => Filter::All,
        };
        self.change()
    }

    /// Scope the catalog to one seller. Clears price and tag filters.
    pub fn set_seller_scope(&mut self, seller_id: &str) -> FilterChange {
        self.scope = Some(seller_id.to_string());
        self.filter = Filter::Seller(seller_id.to_string());
        self.change()
    }

    /// Forget filter and scope; used when a new navigation starts.
    pub fn reset(&mut self) {
        self.filter = Filter::All;
        self.scope = None;
    }

    pub fn change(&self) -> FilterChange {
        FilterChange {
            filter: self.filter.clone(),
            seller_scope: self.scope.clone(),
        }
    }

    /// Value of the sidebar preset matching the active filter.
    ///
    /// `None` while a tag filter (or a custom range) is active.
    pub fn active_price_preset(&self) -> Option<&'static str> {
        match &self.filter {
            Filter::All | Filter::Seller(_) => Some("all"),
            Filter::Price(range) => PRICE_PRESETS
                .iter()
                .map(|(value, _)| *value)
                .find(|value| PriceRange::parse(value).as_ref() == Some(range)),
            Filter::Items(_) => None,
        }
    }

    /// Tags currently filtered on, sorted.
    pub fn active_tags(&self) -> Vec<String> {
        self.filter
            .required_tags()
            .map(|tags| tags.iter().cloned().collect())
            .unwrap_or_default()
    }
}

// =============================================================================
// TagPicker
// =============================================================================

/// What a picker session feeds its result into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerPurpose {
    /// Storefront tag filter.
    Filter,
    /// Dashboard listing form.
    Selection,
}

type CompletionHandler = Box<dyn FnOnce(Vec<String>)>;

/// One open tag picker.
///
/// Consumed by [`TagPicker::apply`] or [`TagPicker::clear`], which invoke
/// this session's handler exactly once. Dropping a session (closing the
/// modal) invokes nothing.
pub struct TagPicker {
    purpose: PickerPurpose,
    selection: BTreeSet<String>,
    on_complete: CompletionHandler,
}

impl TagPicker {
    pub fn for_filter<I>(current_tags: I, on_complete: impl FnOnce(Vec<String>) + 'static) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::open(PickerPurpose::Filter, current_tags, on_complete)
    }

    pub fn for_selection<I>(
        initial_tags: I,
        on_complete: impl FnOnce(Vec<String>) + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::open(PickerPurpose::Selection, initial_tags, on_complete)
    }

    fn open<I>(
        purpose: PickerPurpose,
        tags: I,
        on_complete: impl FnOnce(Vec<String>) + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            purpose,
            selection: tags.into_iter().collect(),
            on_complete: Box::new(on_complete),
        }
    }

    pub fn purpose(&self) -> PickerPurpose {
        self.purpose
    }

    /// Flip one tag; returns whether it is now selected.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.selection.remove(tag) {
            false
        } else {
            self.selection.insert(tag.to_string());
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.selection.contains(tag)
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// Finish with the current selection (sorted).
    pub fn apply(self) {
        (self.on_complete)(self.selection.into_iter().collect());
    }

    /// Finish with an empty selection.
    pub fn clear(self) {
        (self.on_complete)(Vec::new());
    }
}

impl fmt::Debug for TagPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagPicker")
            .field("purpose", &self.purpose)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
