//! Item ↔ ModifierGroup link API module

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
            "/items/{id}/modifier-groups",
            get(handler::list).post(handler::link),
        )
        .route("/items/{id}/candidate-groups", get(handler::candidate_groups))
        .route("/items/{id}/linked-modifiers", get(handler::linked_modifiers))
        .route("/links/{id}", put(handler::update).delete(handler::unlink))
        .route("/links/{id}/move", post(handler::move_link))
}
