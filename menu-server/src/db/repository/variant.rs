//! Variant Repository

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, sort};
use crate::db::models::{Variant, VariantCreate, VariantUpdate};
use crate::utils::validation::{parse_money, validate_name};

const TABLE: &str = "variant";

#[derive(Clone)]
pub struct VariantRepository {
    base: BaseRepository,
}

impl VariantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Variants of one item in display order
    pub async fn find_by_item(&self, item_id: &RecordId) -> RepoResult<Vec<Variant>> {
        let variants: Vec<Variant> = self
            .base
            .db()
            .query("SELECT * FROM variant WHERE item_id = $item ORDER BY sort_order, name")
            .bind(("item", item_id.clone()))
            .await?
            .take(0)?;
        Ok(variants)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Variant>> {
        let variant: Option<Variant> = self.base.db().select(id.clone()).await?;
        Ok(variant)
    }

    pub async fn create(&self, item_id: &RecordId, data: VariantCreate) -> RepoResult<Variant> {
        let name = validate_name(&data.name, "name")?;
        let price_delta = parse_money(&data.price_delta, "price_delta")?;

        let parent: Option<crate::db::models::Item> =
            self.base.db().select(item_id.clone()).await?;
        if parent.is_none() {
            return Err(RepoError::NotFound(format!("Item {} not found", item_id)));
        }

        let orders = self
            .base
            .scope_sort_orders(TABLE, Some(("item_id", item_id)))
            .await?;

        #[derive(Serialize)]
        struct VariantDb {
            item_id: RecordId,
            name: String,
            price_delta: Decimal,
            sort_order: i32,
            is_active: bool,
        }

        let created: Option<Variant> = self
            .base
            .db()
            .create(TABLE)
            .content(VariantDb {
                item_id: item_id.clone(),
                name,
                price_delta,
                sort_order: sort::next_sort_order(&orders),
                is_active: true,
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create variant".to_string()))
    }

    pub async fn update(&self, id: &RecordId, data: VariantUpdate) -> RepoResult<Variant> {
        #[derive(Serialize)]
        struct VariantUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price_delta: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
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
                VariantUpdateDb {
                    name,
                    price_delta,
                    is_active: data.is_active,
                },
            ))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Variant {} not found", id)))
    }

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
