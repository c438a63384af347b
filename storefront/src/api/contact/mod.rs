//! Contact Form API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn public_router() -> Router<ServerState> {
    Router::new().route("/api/contact", post(handler::submit))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/contact", get(handler::list))
}
