//! Variant API module

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
            "/items/{id}/variants",
            get(handler::list).post(handler::create),
        )
        .route(
            "/variants/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route("/variants/{id}/move", post(handler::move_variant))
}
