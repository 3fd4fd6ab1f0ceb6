//! API route modules
//!
//! - [`health`] - liveness probe
//! - [`categories`] - category management
//! - [`items`] - menu item management (nested under categories)
//! - [`variants`] - item variant management
//! - [`modifier_groups`] - modifier group management
//! - [`modifiers`] - modifier management (nested under groups)
//! - [`links`] - item ↔ modifier-group assignment

pub mod auth;
pub mod health;

pub mod categories;
pub mod items;
pub mod links;
pub mod modifier_groups;
pub mod modifiers;
pub mod variants;

use axum::{Router, middleware};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::db::repository::sort::MoveDirection;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResponse, AppResult};

/// `?confirm=true` - the confirmation token for destructive endpoints.
/// Absent or false turns the delete into a no-op.
#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Body of `POST .../move`
#[derive(Debug, Deserialize)]
pub struct MovePayload {
    pub direction: MoveDirection,
}

/// Assemble the full application router
pub fn create_router(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(items::router())
        .merge(variants::router())
        .merge(modifier_groups::router())
        .merge(modifiers::router())
        .merge(links::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
