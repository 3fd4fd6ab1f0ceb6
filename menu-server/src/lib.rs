//! Menu Server - hierarchical product catalog for point-of-sale menus
//!
//! Categories contain items, items carry variants, and modifier groups
//! attach to items through an explicit link table. Every collection is
//! display-ordered; every mutation answers with a freshly fetched view
//! of the scope it touched.
//!
//! # Module structure
//!
//! ```text
//! menu-server/src/
//! ├── core/          # configuration, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── services/      # catalog service with cached views
//! ├── db/            # embedded SurrealDB, models, repositories
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use services::CatalogService;
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the process environment: dotenv, configuration and logging.
/// Production gets daily-rolling file output under the work directory;
/// everything else logs to stdout.
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    if config.is_production() {
        let log_dir = config.log_dir();
        std::fs::create_dir_all(&log_dir).ok();
        init_logger_with_file(Some(&config.log_level), log_dir.to_str());
    } else {
        init_logger();
    }
    config
}
