//! Server State
//!
//! Shared application state handed to every request handler.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::CatalogService;
use crate::utils::AppError;

/// Shared server state: configuration, database handle, catalog service
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub catalog: CatalogService,
}

impl ServerState {
    /// Open the database under the configured work directory and build
    /// the service layer on top of it
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("menu.db");
        let db_service = DbService::new(&db_path).await?;
        let db = db_service.db;

        let catalog = CatalogService::new(db.clone());

        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            catalog,
        })
    }
}
