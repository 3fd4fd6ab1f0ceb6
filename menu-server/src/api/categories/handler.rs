//! Category API Handlers
//!
//! Every mutation responds with the refreshed category list so the
//! caller never renders a stale view.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ConfirmQuery, MovePayload};
use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::AppResult;

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.create_category(payload).await?))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.update_category(&id, payload).await?))
}

/// POST /api/categories/:id/move
pub async fn move_category(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MovePayload>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(
        state.catalog.move_category(&id, payload.direction).await?,
    ))
}

/// DELETE /api/categories/:id?confirm=true
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.catalog.delete_category(&id, query.confirm).await?))
}
