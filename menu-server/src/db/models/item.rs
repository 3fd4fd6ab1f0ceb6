//! Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::db::repository::sort::Sortable;

/// Item - a sellable product within a category. Sort scope: items of one
/// category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub category_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Public URL handed back by the upload collaborator, stored verbatim.
    #[serde(default)]
    pub image_url: Option<String>,
    pub base_price: Decimal,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_featured: bool,
}

fn default_true() -> bool {
    true
}

impl Sortable for Item {
    fn sort_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

/// Create payload. Prices arrive as decimal text typed by the user and
/// are validated before any write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreate {
    pub name: String,
    pub base_price: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update. An empty-string `description`/`image_url` clears the
/// field to null, matching how a blanked-out input is saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl ItemUpdate {
    pub fn prune(mut self, current: &Item) -> Self {
        if self.name.as_deref().map(str::trim) == Some(current.name.as_str()) {
            self.name = None;
        }
        if let Some(desc) = &self.description {
            let next = if desc.trim().is_empty() { None } else { Some(desc.trim()) };
            if next == current.description.as_deref() {
                self.description = None;
            }
        }
        if let Some(url) = &self.image_url {
            let next = if url.trim().is_empty() { None } else { Some(url.trim()) };
            if next == current.image_url.as_deref() {
                self.image_url = None;
            }
        }
        if let Some(price) = &self.base_price
            && let Ok(parsed) = price.trim().parse::<Decimal>()
            && parsed == current.base_price
        {
            self.base_price = None;
        }
        if self.is_active == Some(current.is_active) {
            self.is_active = None;
        }
        if self.is_featured == Some(current.is_featured) {
            self.is_featured = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.base_price.is_none()
            && self.is_active.is_none()
            && self.is_featured.is_none()
    }
}
