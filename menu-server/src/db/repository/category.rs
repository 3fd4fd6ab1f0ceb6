//! Category Repository

use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult, sort};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::validation::validate_name;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories in display order. The admin view includes inactive
    /// rows; filtering is the consumer's concern.
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY sort_order, name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Category>> {
        let category: Option<Category> = self.base.db().select(id.clone()).await?;
        Ok(category)
    }

    /// Create a category appended to the end of the scope
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let name = validate_name(&data.name, "name")?;

        let orders = self.base.scope_sort_orders(TABLE, None).await?;

        #[derive(Serialize)]
        struct CategoryDb {
            name: String,
            sort_order: i32,
            is_active: bool,
        }

        let created: Option<Category> = self
            .base
            .db()
            .create(TABLE)
            .content(CategoryDb {
                name,
                sort_order: sort::next_sort_order(&orders),
                is_active: true,
            })
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Blind partial update; only provided fields are merged
    pub async fn update(&self, id: &RecordId, data: CategoryUpdate) -> RepoResult<Category> {
        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            is_active: Option<bool>,
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
                CategoryUpdateDb {
                    name,
                    is_active: data.is_active,
                },
            ))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete. Confirmation is enforced upstream; items of the
    /// category are not cascaded.
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
