//! Catalog filter types.

use std::collections::BTreeSet;

/// Inclusive price range. `max == None` means unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Parse a sidebar preset value.
    ///
    /// - `"all"` → `None` (no price filter)
    /// - `"800+"` → `800..`
    /// - `"100-300"` → `100..=300`
    ///
    /// Anything else is rejected with `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == "all" {
            return None;
        }

        if let Some(min) = value.strip_suffix('+') {
            let min = min.trim().parse::<f64>().ok()?;
            return Some(Self::new(min, None));
        }

        let (min, max) = value.split_once('-')?;
        let min = min.trim().parse::<f64>().ok()?;
        let max = max.trim().parse::<f64>().ok()?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return None;
        }
        Some(Self::new(min, Some(max)))
    }

    /// Upper bound, if finite.
    pub fn finite_max(&self) -> Option<f64> {
        self.max.filter(|m| m.is_finite())
    }
}

/// Active catalog filter.
///
/// Only one kind is active at a time on the storefront.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Filter {
    /// Every available product.
    #[default]
    All,
    /// Products within a price range.
    Price(PriceRange),
    /// Products carrying every listed tag.
    Items(BTreeSet<String>),
    /// Every available product of one seller.
    Seller(String),
}

impl Filter {
    /// Tags required by this filter, if it is a non-empty tag filter.
    pub fn required_tags(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Items(tags) if !tags.is_empty() => Some(tags),
            _ => None,
        }
    }

    pub fn seller_id(&self) -> Option<&str> {
        match self {
            Self::Seller(id) => Some(id),
            _ => None,
        }
    }
}
