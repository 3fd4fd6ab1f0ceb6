//! Variant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{ConfirmQuery, MovePayload};
use crate::core::ServerState;
use crate::db::models::{Variant, VariantCreate, VariantUpdate};
use crate::utils::AppResult;

/// GET /api/items/:id/variants
pub async fn list(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<Vec<Variant>>> {
    Ok(Json(state.catalog.list_variants(&item_id).await?))
}

/// POST /api/items/:id/variants
pub async fn create(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
    Json(payload): Json<VariantCreate>,
) -> AppResult<Json<Vec<Variant>>> {
    Ok(Json(state.catalog.create_variant(&item_id, payload).await?))
}

/// PUT /api/variants/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<VariantUpdate>,
) -> AppResult<Json<Vec<Variant>>> {
    Ok(Json(state.catalog.update_variant(&id, payload).await?))
}

/// POST /api/variants/:id/move
pub async fn move_variant(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MovePayload>,
) -> AppResult<Json<Vec<Variant>>> {
    Ok(Json(state.catalog.move_variant(&id, payload.direction).await?))
}

/// DELETE /api/variants/:id?confirm=true
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> AppResult<Json<Vec<Variant>>> {
    Ok(Json(state.catalog.delete_variant(&id, query.confirm).await?))
}
