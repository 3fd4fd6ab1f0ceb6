//! Modifier Group Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;
use crate::db::repository::sort::Sortable;

/// How many modifiers of a group may be chosen at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    /// Choose exactly one - caps every link's max_choices at 1
    Single,
    /// Choose many
    Multi,
}

/// ModifierGroup - a reusable library of modifiers, global sort scope.
/// Groups exist independently of items; assignment happens through
/// [`super::ItemModifierLink`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroup {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub selection_type: SelectionType,
    #[serde(default)]
    pub sort_order: i32,
}

impl Sortable for ModifierGroup {
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
pub struct ModifierGroupCreate {
    pub name: String,
    pub selection_type: SelectionType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_type: Option<SelectionType>,
}

impl ModifierGroupUpdate {
    pub fn prune(mut self, current: &ModifierGroup) -> Self {
        if self.name.as_deref().map(str::trim) == Some(current.name.as_str()) {
            self.name = None;
        }
        if self.selection_type == Some(current.selection_type) {
            self.selection_type = None;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.selection_type.is_none()
    }
}
