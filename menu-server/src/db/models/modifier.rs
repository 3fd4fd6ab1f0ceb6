//! Modifier Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::db::repository::sort::Sortable;

/// Modifier - one choice within a modifier group. Sort scope: modifiers
/// of one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub group_id: RecordId,
    pub name: String,
    pub price_delta: Decimal,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    /// Whether choosing this modifier changes kitchen preparation
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub affects_prep: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

impl Sortable for Modifier {
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
pub struct ModifierCreate {
    pub name: String,
    /// Signed decimal text, e.g. "0.50" or "-0.25"
    pub price_delta: String,
    pub affects_prep: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_delta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affects_prep: Option<bool>,
}

impl ModifierUpdate {
    pub fn prune(mut self, current: &Modifier) -> Self {
        if self.name.as_deref().map(str::trim) == Some(current.name.as_str()) {
            self.name = None;
        }
        if let Some(delta) = &self.price_delta
            && let Ok(parsed) = delta.trim().parse::<Decimal>()
            && parsed == current.price_delta
        {
            self.price_delta = None;
        }
        if self.is_active == Some(current.is_active) {
            self.is_active = None;
        }
        if self.affects_prep == Some(current.affects_prep) {
            self.affects_prep = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price_delta.is_none()
            && self.is_active.is_none()
            && self.affects_prep.is_none()
    }
}
