//! Modifier API module

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
            "/modifier-groups/{id}/modifiers",
            get(handler::list).post(handler::create),
        )
        .route(
            "/modifiers/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route("/modifiers/{id}/move", post(handler::move_modifier))
}
