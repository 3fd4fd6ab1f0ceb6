//! Category Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::db::repository::sort::Sortable;

/// Category - top-level menu grouping. Sort scope: all categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Sortable for Category {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CategoryUpdate {
    /// Drop fields whose value equals the current record, so unchanged
    /// fields never cause a redundant write.
    pub fn prune(mut self, current: &Category) -> Self {
        if self.name.as_deref().map(str::trim) == Some(current.name.as_str()) {
            self.name = None;
        }
        if self.is_active == Some(current.is_active) {
            self.is_active = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_active.is_none()
    }
}
