//! Item API module
//!
//! Item collections live under their category; single-item operations
//! address the item directly.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/categories/{id}/items",
            get(handler::list).post(handler::create),
        )
        .route("/items/{id}", put(handler::update).delete(handler::delete))
        .route("/items/{id}/move", post(handler::move_item))
}
