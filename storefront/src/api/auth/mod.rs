//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Public auth routes (no session required)
pub fn public_router() -> Router<ServerState> {
    Router::new().route("/api/auth/login", post(handler::login))
}

/// Session-guarded auth routes (mounted inside the admin group)
pub fn session_router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/logout", post(handler::logout))
}
