//! Static content panels: community channels and sale references.

use serde::{Deserialize, Serialize};

use crate::config::catalog::UNKNOWN_SELLER_NAME;

/// A link button on the channels panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLink {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}

impl ChannelLink {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("Link")
    }

    pub fn href(&self) -> &str {
        self.url.as_deref().unwrap_or("#")
    }
}

/// A group of chat links for one game franchise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchise {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub links: Vec<ChannelLink>,
}

/// Contents of `channels.json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channels {
    #[serde(default)]
    pub main: Vec<ChannelLink>,
    #[serde(default)]
    pub franchises: Vec<Franchise>,
}

/// Proof-of-sale image posted by a seller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReference {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub seller_name: Option<String>,
}

impl SaleReference {
    pub fn seller_label(&self) -> &str {
        self.seller_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_SELLER_NAME)
    }
}
