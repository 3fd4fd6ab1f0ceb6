//! Item ↔ ModifierGroup Link Model
//!
//! The junction row assigning a modifier group to an item, with per-item
//! overrides. At most one link may exist per (item, group) pair; an
//! inactive link still occupies the slot.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::SelectionType;
use super::serde_helpers;
use crate::db::repository::sort::Sortable;

/// ItemModifierLink - sort scope: links of one item. Every link handed to
/// a caller has already passed through [`effective_max_choices`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemModifierLink {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub item_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub group_id: RecordId,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_required: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
    /// Cap on how many modifiers may be chosen; null means unlimited.
    /// Always 1 as observed when the group's selection type is single.
    #[serde(default)]
    pub max_choices: Option<i32>,
    /// Pre-selected modifier; must belong to the linked group.
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub default_modifier_id: Option<RecordId>,
}

fn default_true() -> bool {
    true
}

impl Sortable for ItemModifierLink {
    fn sort_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn sort_name(&self) -> &str {
        // Links have no display name; queries and swap planning break
        // sort_order ties by the record id instead.
        ""
    }
}

/// The observed value of `max_choices` for a link of a group with the
/// given selection type.
///
/// This is a projection applied on every observation path, not only at
/// write time, so a group whose selection type changed out of band
/// self-corrects the next time its links are read.
pub fn effective_max_choices(selection_type: SelectionType, stored: Option<i32>) -> Option<i32> {
    match selection_type {
        SelectionType::Single => Some(1),
        SelectionType::Multi => stored,
    }
}

/// Partial update for a link. A requested `max_choices` is overridden to
/// 1 when the linked group is single-selection. An empty-string
/// `default_modifier_id` clears the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemModifierLinkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_choices: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_modifier_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_selection_always_observes_one() {
        assert_eq!(effective_max_choices(SelectionType::Single, Some(5)), Some(1));
        assert_eq!(effective_max_choices(SelectionType::Single, None), Some(1));
        assert_eq!(effective_max_choices(SelectionType::Single, Some(1)), Some(1));
    }

    #[test]
    fn multi_selection_passes_stored_value_through() {
        assert_eq!(effective_max_choices(SelectionType::Multi, Some(3)), Some(3));
        assert_eq!(effective_max_choices(SelectionType::Multi, None), None);
    }
}
