//! Modifier Group Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, sort};
use crate::db::models::{ModifierGroup, ModifierGroupCreate, ModifierGroupUpdate, SelectionType};
use crate::utils::validation::validate_name;

const TABLE: &str = "modifier_group";

#[derive(Clone)]
pub struct ModifierGroupRepository {
    base: BaseRepository,
}

impl ModifierGroupRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// The whole group library in display order (global sort scope)
    pub async fn find_all(&self) -> RepoResult<Vec<ModifierGroup>> {
        let groups: Vec<ModifierGroup> = self
            .base
            .db()
            .query("SELECT * FROM modifier_group ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(groups)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<ModifierGroup>> {
        let group: Option<ModifierGroup> = self.base.db().select(id.clone()).await?;
        Ok(group)
    }

    pub async fn create(&self, data: ModifierGroupCreate) -> RepoResult<ModifierGroup> {
        let name = validate_name(&data.name, "name")?;

        let orders = self.base.scope_sort_orders(TABLE, None).await?;

        #[derive(Serialize)]
        struct ModifierGroupDb {
            name: String,
            selection_type: SelectionType,
            sort_order: i32,
        }

        let created: Option<ModifierGroup> = self
            .base
            .db()
            .create(TABLE)
            .content(ModifierGroupDb {
                name,
                selection_type: data.selection_type,
                sort_order: sort::next_sort_order(&orders),
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create modifier group".to_string()))
    }

    /// Blind partial update. Changing `selection_type` needs no touch-up
    /// of existing links here: their `max_choices` self-corrects at read
    /// time (see `models::effective_max_choices`).
    pub async fn update(&self, id: &RecordId, data: ModifierGroupUpdate) -> RepoResult<ModifierGroup> {
        #[derive(Serialize)]
        struct ModifierGroupUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            selection_type: Option<SelectionType>,
        }

        let name = match data.name {
            Some(n) => Some(validate_name(&n, "name")?),
            None => None,
        };

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", id.clone()))
            .bind((
                "data",
                ModifierGroupUpdateDb {
                    name,
                    selection_type: data.selection_type,
                },
            ))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Modifier group {} not found", id)))
    }

    /// Hard delete. Link rows referencing the group go with it; the
    /// group's modifiers do not cascade.
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE item_modifier_link WHERE group_id = $id")
            .bind(("id", id.clone()))
            .await?
            .check()?;

        self.base
            .db()
            .query("DELETE $id")
            .bind(("id", id.clone()))
            .await?
            .check()?;
        Ok(true)
    }

    pub async fn apply_swap(
        &self,
        plan: (sort::SwapAssignment, sort::SwapAssignment),
    ) -> RepoResult<()> {
        self.base.apply_swap(plan).await
    }
}
