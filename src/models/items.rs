//! Categorized item catalog used by the tag picker.
//!
//! Loaded from a static JSON file shaped as:
//!
//! ```json
//! {
//!   "weapons": { "icon": "/images/icons/weapons.png", "items": ["Sword", {"name": "Bow", "icon": "/images/bow.png"}] }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Icon used for categories without one.
pub const DEFAULT_CATEGORY_ICON: &str = "/images/icons/default_icon.png";

/// A selectable item, written either as a bare name or as `{name, icon}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        icon: Option<String>,
    },
}

impl ItemEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { name, .. } => name,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Detailed { icon, .. } => icon.as_deref(),
        }
    }
}

/// One picker tab.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCategory {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

impl ItemCategory {
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_CATEGORY_ICON)
    }
}

/// Category key → category, kept in key order.
pub type ItemCatalog = BTreeMap<String, ItemCategory>;

/// Tab label for a category key (first letter upper-cased).
pub fn category_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
