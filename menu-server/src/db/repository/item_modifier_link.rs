//! Item ↔ ModifierGroup Linkage Repository
//!
//! Owns the junction table and its derived constraints. Every read path
//! joins the linked group's `selection_type` and projects `max_choices`
//! through `effective_max_choices`, so the choose-one cap holds even when
//! a group's selection type was changed after the link was written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, record_id, sort};
use crate::db::models::serde_helpers;
use crate::db::models::{
    ItemModifierLink, ItemModifierLinkUpdate, Modifier, ModifierGroup, SelectionType,
    effective_max_choices,
};

const TABLE: &str = "item_modifier_link";

/// Link row as read from the store, with the group's selection type
/// joined in for the projection.
#[derive(Debug, Deserialize)]
struct LinkRow {
    #[serde(default, with = "serde_helpers::option_record_id")]
    id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    item_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    group_id: RecordId,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    is_required: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    is_active: bool,
    #[serde(default)]
    sort_order: i32,
    #[serde(default)]
    max_choices: Option<i32>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    default_modifier_id: Option<RecordId>,
    group_selection_type: SelectionType,
}

fn default_true() -> bool {
    true
}

impl LinkRow {
    /// The link as observed by callers - `max_choices` projected
    fn into_observed(self) -> ItemModifierLink {
        ItemModifierLink {
            id: self.id,
            item_id: self.item_id,
            group_id: self.group_id,
            is_required: self.is_required,
            is_active: self.is_active,
            sort_order: self.sort_order,
            max_choices: effective_max_choices(self.group_selection_type, self.max_choices),
            default_modifier_id: self.default_modifier_id,
        }
    }
}

#[derive(Clone)]
pub struct ItemModifierLinkRepository {
    base: BaseRepository,
}

impl ItemModifierLinkRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Links of one item in display order, projected
    pub async fn find_by_item(&self, item_id: &RecordId) -> RepoResult<Vec<ItemModifierLink>> {
        let rows: Vec<LinkRow> = self
            .base
            .db()
            .query(
                "SELECT *, group_id.selection_type AS group_selection_type \
                 FROM item_modifier_link WHERE item_id = $item ORDER BY sort_order, id",
            )
            .bind(("item", item_id.clone()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().map(LinkRow::into_observed).collect())
    }

    /// Single link, projected
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<ItemModifierLink>> {
        Ok(self.find_row(id).await?.map(LinkRow::into_observed))
    }

    async fn find_row(&self, id: &RecordId) -> RepoResult<Option<LinkRow>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT *, group_id.selection_type AS group_selection_type \
                 FROM item_modifier_link WHERE id = $id",
            )
            .bind(("id", id.clone()))
            .await?;
        let rows: Vec<LinkRow> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Assign a group to an item. Fails with `DuplicateLink` when the
    /// (item, group) slot is occupied - an inactive link still counts.
    pub async fn create(
        &self,
        item_id: &RecordId,
        group_id: &RecordId,
    ) -> RepoResult<ItemModifierLink> {
        let item: Option<crate::db::models::Item> =
            self.base.db().select(item_id.clone()).await?;
        if item.is_none() {
            return Err(RepoError::NotFound(format!("Item {} not found", item_id)));
        }
        let group: Option<ModifierGroup> = self.base.db().select(group_id.clone()).await?;
        if group.is_none() {
            return Err(RepoError::NotFound(format!(
                "Modifier group {} not found",
                group_id
            )));
        }

        let existing: Vec<RecordId> = self
            .base
            .db()
            .query(
                "SELECT VALUE id FROM item_modifier_link \
                 WHERE item_id = $item AND group_id = $group",
            )
            .bind(("item", item_id.clone()))
            .bind(("group", group_id.clone()))
            .await?
            .take(0)?;
        if !existing.is_empty() {
            return Err(RepoError::DuplicateLink(format!(
                "Group {} is already linked to item {}",
                group_id, item_id
            )));
        }

        let orders = self
            .base
            .scope_sort_orders(TABLE, Some(("item_id", item_id)))
            .await?;

        #[derive(Serialize)]
        struct LinkDb {
            item_id: RecordId,
            group_id: RecordId,
            is_required: bool,
            is_active: bool,
            sort_order: i32,
            max_choices: Option<i32>,
            default_modifier_id: Option<RecordId>,
        }

        let created: Option<ItemModifierLink> = self
            .base
            .db()
            .create(TABLE)
            .content(LinkDb {
                item_id: item_id.clone(),
                group_id: group_id.clone(),
                is_required: false,
                is_active: true,
                sort_order: sort::next_sort_order(&orders),
                max_choices: None,
                default_modifier_id: None,
            })
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create link".to_string()))?;

        // Hand back the observed (projected) form, not the raw insert
        let id = created
            .id
            .ok_or_else(|| RepoError::Database("Created link has no id".to_string()))?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Created link vanished".to_string()))
    }

    /// Patch a link, then re-derive `max_choices` for its group's
    /// selection type. A `default_modifier_id` from a different group is
    /// rejected before any write, retaining the prior value.
    pub async fn update(
        &self,
        id: &RecordId,
        data: ItemModifierLinkUpdate,
    ) -> RepoResult<ItemModifierLink> {
        let row = self
            .find_row(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Link {} not found", id)))?;

        // Empty string clears the default; anything else must name a
        // modifier of the linked group (active or not).
        let default_modifier_id = match data.default_modifier_id.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(raw) => {
                let modifier_id = record_id("modifier", raw);
                let modifier: Option<Modifier> =
                    self.base.db().select(modifier_id.clone()).await?;
                match modifier {
                    Some(m) if m.group_id == row.group_id => Some(Some(modifier_id)),
                    Some(_) => {
                        return Err(RepoError::InvalidDefaultModifier(format!(
                            "Modifier {} does not belong to group {}",
                            modifier_id, row.group_id
                        )));
                    }
                    None => {
                        return Err(RepoError::InvalidDefaultModifier(format!(
                            "Modifier {} not found",
                            modifier_id
                        )));
                    }
                }
            }
        };

        // Write-time derivation; the read path re-projects regardless
        let max_choices = match row.group_selection_type {
            SelectionType::Single => Some(1),
            SelectionType::Multi => data.max_choices,
        };

        #[derive(Serialize)]
        struct LinkUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            is_required: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            max_choices: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            default_modifier_id: Option<Option<RecordId>>,
        }

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", id.clone()))
            .bind((
                "data",
                LinkUpdateDb {
                    is_required: data.is_required,
                    is_active: data.is_active,
                    max_choices,
                    default_modifier_id,
                },
            ))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Link {} not found", id)))
    }

    /// Remove the link row only - the group and its modifiers stay
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", id.clone()))
            .await?
            .check()?;
        Ok(true)
    }

    /// Groups not yet linked to the item - the "add a group" choices.
    /// Inactive links still occupy their slot and exclude their group.
    pub async fn candidate_groups(&self, item_id: &RecordId) -> RepoResult<Vec<ModifierGroup>> {
        let linked = self.linked_group_ids(item_id).await?;
        let groups: Vec<ModifierGroup> = self
            .base
            .db()
            .query("SELECT * FROM modifier_group ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(groups
            .into_iter()
            .filter(|g| g.id.as_ref().is_none_or(|id| !linked.contains(id)))
            .collect())
    }

    /// Modifiers of every group linked to the item, partitioned by group
    /// id, each partition in display order - feeds default-modifier
    /// selection.
    pub async fn modifiers_for_linked_groups(
        &self,
        item_id: &RecordId,
    ) -> RepoResult<HashMap<String, Vec<Modifier>>> {
        let linked = self.linked_group_ids(item_id).await?;
        if linked.is_empty() {
            return Ok(HashMap::new());
        }

        let modifiers: Vec<Modifier> = self
            .base
            .db()
            .query(
                "SELECT * FROM modifier WHERE group_id INSIDE $groups \
                 ORDER BY sort_order, name",
            )
            .bind(("groups", linked))
            .await?
            .take(0)?;

        let mut by_group: HashMap<String, Vec<Modifier>> = HashMap::new();
        for modifier in modifiers {
            by_group
                .entry(modifier.group_id.to_string())
                .or_default()
                .push(modifier);
        }
        Ok(by_group)
    }

    async fn linked_group_ids(&self, item_id: &RecordId) -> RepoResult<Vec<RecordId>> {
        let ids: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE group_id FROM item_modifier_link WHERE item_id = $item")
            .bind(("item", item_id.clone()))
            .await?
            .take(0)?;
        Ok(ids)
    }

    pub async fn apply_swap(
        &self,
        plan: (sort::SwapAssignment, sort::SwapAssignment),
    ) -> RepoResult<()> {
        self.base.apply_swap(plan).await
    }
}
