//! Cake Quote API 模块（公开）

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cakes/price", post(handler::price))
        .route("/api/pricing-structure", get(handler::pricing_structure))
}
