//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) plus schema definition

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "menu";
const DATABASE: &str = "catalog";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database under `db_path` and apply the schema
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {}", db_path.display());

        Self::define_schema(&db).await?;

        Ok(Self { db })
    }

    /// Idempotent table and index definitions, applied on every startup
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            "DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
             DEFINE TABLE IF NOT EXISTS item SCHEMALESS;
             DEFINE TABLE IF NOT EXISTS variant SCHEMALESS;
             DEFINE TABLE IF NOT EXISTS modifier_group SCHEMALESS;
             DEFINE TABLE IF NOT EXISTS modifier SCHEMALESS;
             DEFINE TABLE IF NOT EXISTS item_modifier_link SCHEMALESS;
             DEFINE INDEX IF NOT EXISTS idx_link_item_group \
                 ON TABLE item_modifier_link COLUMNS item_id, group_id UNIQUE;",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

        tracing::info!("Database schema applied");
        Ok(())
    }
}
