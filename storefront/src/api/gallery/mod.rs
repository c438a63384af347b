//! Gallery API 模块

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

/// Public routes: listing and Instagram embeds
pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/api/gallery", get(handler::list))
        .route("/api/gallery/instagram", get(handler::instagram_embed))
}

/// Admin routes: create/update/delete
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/gallery", post(handler::create))
        .route(
            "/api/admin/gallery/{id}",
            put(handler::update).delete(handler::delete),
        )
}
