//! Pricing Admin API 模块
//!
//! 定价文档的后台管理：读取、整体替换（自动备份）、备份列表。
//! 整组路由由 `require_admin` 中间件保护（在 [`crate::api::router`] 挂载）。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/pricing",
            get(handler::get_document).put(handler::replace_document),
        )
        .route("/api/admin/pricing/backups", get(handler::list_backups))
}
