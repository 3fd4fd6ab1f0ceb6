//! Modifier API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ConfirmQuery, MovePayload};
use crate::core::ServerState;
use crate::db::models::{Modifier, ModifierCreate, ModifierUpdate};
use crate::utils::AppResult;

/// GET /api/modifier-groups/:id/modifiers
pub async fn list(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
) -> AppResult<Json<Vec<Modifier>>> {
    Ok(Json(state.catalog.list_modifiers(&group_id).await?))
}

/// POST /api/modifier-groups/:id/modifiers
pub async fn create(
    State(state): State<ServerState>,
    Path(group_id): Path<String>,
    Json(payload): Json<ModifierCreate>,
) -> AppResult<Json<Vec<Modifier>>> {
    Ok(Json(state.catalog.create_modifier(&group_id, payload).await?))
}

/// PUT /api/modifiers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ModifierUpdate>,
) -> AppResult<Json<Vec<Modifier>>> {
    Ok(Json(state.catalog.update_modifier(&id, payload).await?))
}

/// POST /api/modifiers/:id/move
pub async fn move_modifier(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MovePayload>,
) -> AppResult<Json<Vec<Modifier>>> {
    Ok(Json(state.catalog.move_modifier(&id, payload.direction).await?))
}

/// DELETE /api/modifiers/:id?confirm=true
///
/// Links whose default pointed at the deleted modifier keep their stored
/// value; reads recompute against what exists.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<Vec<Modifier>>> {
    Ok(Json(state.catalog.delete_modifier(&id, query.confirm).await?))
}
