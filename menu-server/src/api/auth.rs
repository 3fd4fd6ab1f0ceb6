//! Admin token middleware
//!
//! A single opaque bearer token guards the API. When no token is
//! configured the API is open, which is the development default.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::utils::AppError;

pub async fn require_auth(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight passes through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || path == "/api/health" {
        return Ok(next.run(req).await);
    }

    let Some(expected) = state.config.admin_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if token == expected => Ok(next.run(req).await),
        _ => {
            tracing::warn!("Rejected unauthenticated request to {}", path);
            Err(AppError::Unauthorized)
        }
    }
}
