//! Page Content API 模块

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn public_router() -> Router<ServerState> {
    Router::new().route("/api/pages/{slug}", get(handler::get))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/pages/{slug}", put(handler::update))
}
