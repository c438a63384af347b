//! Orders API 模块
//!
//! 公开的结账接口 + 后台的订单管理接口。

mod handler;

use axum::{Router, routing::get, routing::patch, routing::post};

use crate::core::ServerState;

/// Public checkout route
pub fn public_router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::checkout))
}

/// Admin order management routes
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/orders", get(handler::list))
        .route("/api/admin/orders/{id}", get(handler::get_by_id))
        .route("/api/admin/orders/{id}/status", patch(handler::update_status))
}
