//! Link API Handlers
//!
//! Assignment of modifier groups to items. Link lists come back with
//! `max_choices` already projected for each group's selection type.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::{ConfirmQuery, MovePayload};
use crate::core::ServerState;
use crate::db::models::{ItemModifierLink, ItemModifierLinkUpdate, Modifier, ModifierGroup};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct LinkPayload {
    pub group_id: String,
}

/// GET /api/items/:id/modifier-groups
pub async fn list(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<Vec<ItemModifierLink>>> {
    Ok(Json(state.catalog.list_links(&item_id).await?))
}

/// POST /api/items/:id/modifier-groups
///
/// 409 when the group is already linked to the item.
pub async fn link(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
    Json(payload): Json<LinkPayload>,
) -> AppResult<Json<Vec<ItemModifierLink>>> {
    Ok(Json(
        state.catalog.link_group(&item_id, &payload.group_id).await?,
    ))
}

/// PUT /api/links/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemModifierLinkUpdate>,
) -> AppResult<Json<Vec<ItemModifierLink>>> {
    Ok(Json(state.catalog.update_link(&id, payload).await?))
}

/// POST /api/links/:id/move
pub async fn move_link(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MovePayload>,
) -> AppResult<Json<Vec<ItemModifierLink>>> {
    Ok(Json(state.catalog.move_link(&id, payload.direction).await?))
}

/// DELETE /api/links/:id?confirm=true
///
/// Detaches the group from the item; the group and its modifiers remain.
pub async fn unlink(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<Vec<ItemModifierLink>>> {
    Ok(Json(state.catalog.unlink_group(&id, query.confirm).await?))
}

/// GET /api/items/:id/candidate-groups
pub async fn candidate_groups(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<Vec<ModifierGroup>>> {
    Ok(Json(state.catalog.candidate_groups(&item_id).await?))
}

/// GET /api/items/:id/linked-modifiers
pub async fn linked_modifiers(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<HashMap<String, Vec<Modifier>>>> {
    Ok(Json(state.catalog.linked_modifiers(&item_id).await?))
}
