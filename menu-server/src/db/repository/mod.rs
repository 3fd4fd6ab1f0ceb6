//! Repository Module
//!
//! Typed CRUD over the embedded SurrealDB tables, one repository per
//! entity kind. Every repository follows the same contract:
//!
//! - lists return ascending `(sort_order, name)` for their scope
//! - creates validate input, then append to the end of the scope
//! - updates are blind `UPDATE ... MERGE` patches; callers reconcile by
//!   re-fetching the scope afterwards (see `services::CatalogService`)
//! - deletes are hard and unconditional; confirmation lives upstream

pub mod sort;

pub mod category;
pub mod item;
pub mod item_modifier_link;
pub mod modifier;
pub mod modifier_group;
pub mod variant;

pub use category::CategoryRepository;
pub use item::ItemRepository;
pub use item_modifier_link::ItemModifierLinkRepository;
pub use modifier::ModifierRepository;
pub use modifier_group::ModifierGroupRepository;
pub use variant::VariantRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types - the operation-level failure taxonomy
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A (item, group) slot is already occupied, active link or not
    #[error("Duplicate link: {0}")]
    DuplicateLink(String),

    /// A default modifier was named that does not belong to the link's group
    #[error("Invalid default modifier: {0}")]
    InvalidDefaultModifier(String),

    /// Malformed input, detected before any write was attempted
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backing store reported a failure on read or write
    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an id argument into a RecordId for the given table.
///
/// Accepts both the bare key ("abc123") and the full "table:abc123" form
/// used in API payloads.
pub fn record_id(table: &str, id: &str) -> RecordId {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => RecordId::from_table_key(table, key),
        _ => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Current `sort_order` values of a scope, for the append rule.
    /// `scope_field`/`scope_id` filter by parent; `None` means the whole
    /// table is one scope (categories, modifier groups).
    pub async fn scope_sort_orders(
        &self,
        table: &str,
        scope: Option<(&str, &RecordId)>,
    ) -> RepoResult<Vec<i32>> {
        let orders: Vec<i32> = match scope {
            Some((field, id)) => {
                self.db
                    .query(format!(
                        "SELECT VALUE sort_order FROM {table} WHERE {field} = $scope"
                    ))
                    .bind(("scope", id.clone()))
                    .await?
                    .take(0)?
            }
            None => {
                self.db
                    .query(format!("SELECT VALUE sort_order FROM {table}"))
                    .await?
                    .take(0)?
            }
        };
        Ok(orders)
    }

    /// Apply a planned adjacent swap as two independent writes issued
    /// concurrently. Either write may land first; a transient duplicate
    /// `sort_order` between them is accepted and healed by the caller's
    /// refresh. Both writes are always attempted before the first error
    /// is surfaced.
    pub async fn apply_swap(
        &self,
        plan: (sort::SwapAssignment, sort::SwapAssignment),
    ) -> RepoResult<()> {
        let (a, b) = plan;
        let ua = self
            .db
            .query("UPDATE $id SET sort_order = $sort")
            .bind(("id", a.id))
            .bind(("sort", a.sort_order));
        let ub = self
            .db
            .query("UPDATE $id SET sort_order = $sort")
            .bind(("id", b.id))
            .bind(("sort", b.sort_order));

        let (ra, rb) = tokio::join!(ua, ub);
        ra?.check()?;
        rb?.check()?;
        Ok(())
    }
}
