//! Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ConfirmQuery, MovePayload};
use crate::core::ServerState;
use crate::db::models::{Item, ItemCreate, ItemUpdate};
use crate::utils::AppResult;

/// GET /api/categories/:id/items
pub async fn list(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.list_items(&category_id).await?))
}

/// POST /api/categories/:id/items
pub async fn create(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.create_item(&category_id, payload).await?))
}

/// PUT /api/items/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.update_item(&id, payload).await?))
}

/// POST /api/items/:id/move
pub async fn move_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MovePayload>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.move_item(&id, payload.direction).await?))
}

/// DELETE /api/items/:id?confirm=true
///
/// Removes the item together with its modifier-group links.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.catalog.delete_item(&id, query.confirm).await?))
}
