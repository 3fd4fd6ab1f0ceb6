//! Modifier Group API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ConfirmQuery, MovePayload};
use crate::core::ServerState;
use crate::db::models::{ModifierGroup, ModifierGroupCreate, ModifierGroupUpdate};
use crate::utils::AppResult;

/// GET /api/modifier-groups
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ModifierGroup>>> {
    Ok(Json(state.catalog.list_groups().await?))
}

/// POST /api/modifier-groups
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ModifierGroupCreate>,
) -> AppResult<Json<Vec<ModifierGroup>>> {
    Ok(Json(state.catalog.create_group(payload).await?))
}

/// PUT /api/modifier-groups/:id
///
/// Changing `selection_type` rewrites no link rows; links observe the
/// new type on their next read.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ModifierGroupUpdate>,
) -> AppResult<Json<Vec<ModifierGroup>>> {
    Ok(Json(state.catalog.update_group(&id, payload).await?))
}

/// POST /api/modifier-groups/:id/move
pub async fn move_group(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MovePayload>,
) -> AppResult<Json<Vec<ModifierGroup>>> {
    Ok(Json(state.catalog.move_group(&id, payload.direction).await?))
}

/// DELETE /api/modifier-groups/:id?confirm=true
///
/// Removes the group and every item link referencing it; the group's
/// modifiers are left behind.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<Vec<ModifierGroup>>> {
    Ok(Json(state.catalog.delete_group(&id, query.confirm).await?))
}
