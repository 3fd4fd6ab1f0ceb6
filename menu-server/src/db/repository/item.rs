//! Item Repository

use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, sort};
use crate::db::models::{Item, ItemCreate, ItemUpdate};
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_URL_LEN, parse_money, validate_name, validate_optional_text,
};

const TABLE: &str = "item";

#[derive(Clone)]
pub struct ItemRepository {
    base: BaseRepository,
}

impl ItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Items of one category in display order
    pub async fn find_by_category(&self, category_id: &RecordId) -> RepoResult<Vec<Item>> {
        let items: Vec<Item> = self
            .base
            .db()
            .query("SELECT * FROM item WHERE category_id = $cat ORDER BY sort_order, name")
            .bind(("cat", category_id.clone()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Item>> {
        let item: Option<Item> = self.base.db().select(id.clone()).await?;
        Ok(item)
    }

    /// Create an item appended to the end of its category scope.
    /// `base_price` is decimal text and rejects before any write.
    pub async fn create(&self, category_id: &RecordId, data: ItemCreate) -> RepoResult<Item> {
        let name = validate_name(&data.name, "name")?;
        let base_price = parse_money(&data.base_price, "base_price")?;
        validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&data.image_url, "image_url", MAX_URL_LEN)?;

        // A missing parent is a NotFound, not a dangling reference
        let parent: Option<crate::db::models::Category> =
            self.base.db().select(category_id.clone()).await?;
        if parent.is_none() {
            return Err(RepoError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }

        let orders = self
            .base
            .scope_sort_orders(TABLE, Some(("category_id", category_id)))
            .await?;

        #[derive(Serialize)]
        struct ItemDb {
            category_id: RecordId,
            name: String,
            description: Option<String>,
            image_url: Option<String>,
            base_price: Decimal,
            sort_order: i32,
            is_active: bool,
            is_featured: bool,
        }

        let created: Option<Item> = self
            .base
            .db()
            .create(TABLE)
            .content(ItemDb {
                category_id: category_id.clone(),
                name,
                description: data
                    .description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                image_url: data
                    .image_url
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty()),
                base_price,
                sort_order: sort::next_sort_order(&orders),
                is_active: true,
                is_featured: false,
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create item".to_string()))
    }

    /// Blind partial update. Empty-string description/image_url clears the
    /// field to null.
    pub async fn update(&self, id: &RecordId, data: ItemUpdate) -> RepoResult<Item> {
        #[derive(Serialize)]
        struct ItemUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<Option<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_url: Option<Option<String>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            base_price: Option<Decimal>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_featured: Option<bool>,
        }

        let name = match data.name {
            Some(n) => Some(validate_name(&n, "name")?),
            None => None,
        };
        let base_price = match data.base_price {
            Some(p) => Some(parse_money(&p, "base_price")?),
            None => None,
        };
        validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&data.image_url, "image_url", MAX_URL_LEN)?;

        let update = ItemUpdateDb {
            name,
            description: data
                .description
                .map(|d| Some(d.trim().to_string()).filter(|d| !d.is_empty())),
            image_url: data
                .image_url
                .map(|u| Some(u.trim().to_string()).filter(|u| !u.is_empty())),
            base_price,
            is_active: data.is_active,
            is_featured: data.is_featured,
        };

        self.base
            .db()
            .query("UPDATE $id MERGE $data")
            .bind(("id", id.clone()))
            .bind(("data", update))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))
    }

    /// Hard delete. Link rows of the item go with it; nothing else
    /// cascades.
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base
            .db()
            .query("DELETE item_modifier_link WHERE item_id = $id")
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
