//! Modifier Repository

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, sort};
use crate::db::models::{Modifier, ModifierCreate, ModifierUpdate};
use crate::utils::validation::{parse_money, validate_name};

const TABLE: &str = "modifier";

#[derive(Clone)]
pub struct ModifierRepository {
    base: BaseRepository,
}

impl ModifierRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Modifiers of one group in display order
    pub async fn find_by_group(&self, group_id: &RecordId) -> RepoResult<Vec<Modifier>> {
        let modifiers: Vec<Modifier> = self
            .base
            .db()
            .query("SELECT * FROM modifier WHERE group_id = $group ORDER BY sort_order, name")
            .bind(("group", group_id.clone()))
            .await?
            .take(0)?;
        Ok(modifiers)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Modifier>> {
        let modifier: Option<Modifier> = self.base.db().select(id.clone()).await?;
        Ok(modifier)
    }

    pub async fn create(&self, group_id: &RecordId, data: ModifierCreate) -> RepoResult<Modifier> {
        let name = validate_name(&data.name, "name")?;
        let price_delta = parse_money(&data.price_delta, "price_delta")?;

        let parent: Option<crate::db::models::ModifierGroup> =
            self.base.db().select(group_id.clone()).await?;
        if parent.is_none() {
            return Err(RepoError::NotFound(format!(
                "Modifier group {} not found",
                group_id
            )));
        }

        let orders = self
            .base
            .scope_sort_orders(TABLE, Some(("group_id", group_id)))
            .await?;

        #[derive(Serialize)]
        struct ModifierDb {
            group_id: RecordId,
            name: String,
            price_delta: Decimal,
            is_active: bool,
            affects_prep: bool,
            sort_order: i32,
        }

        let created: Option<Modifier> = self
            .base
            .db()
            .create(TABLE)
            .content(ModifierDb {
                group_id: group_id.clone(),
                name,
                price_delta,
                is_active: true,
                affects_prep: data.affects_prep.unwrap_or(false),
                sort_order: sort::next_sort_order(&orders),
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create modifier".to_string()))
    }

    pub async fn update(&self, id: &RecordId, data: ModifierUpdate) -> RepoResult<Modifier> {
        #[derive(Serialize)]
        struct ModifierUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price_delta: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            affects_prep: Option<bool>,
        }

        let name = match data.name {
            Some(n) => Some(validate_name(&n, "name")?),
            None => None,
        };
        let price_delta = match data.price_delta {
            Some(d) => Some(parse_money(&d, "price_delta")?),
            None => None,
        };

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", id.clone()))
            .bind((
                "data",
                ModifierUpdateDb {
                    name,
                    price_delta,
                    is_active: data.is_active,
                    affects_prep: data.affects_prep,
                },
            ))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Modifier {} not found", id)))
    }

    /// Hard delete. Links whose default points at this modifier keep the
    /// dangling id; candidates are recomputed from the group on the next
    /// default-selection read.
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
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
