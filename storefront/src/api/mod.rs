//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理员登录/会话接口
//! - [`cakes`] - 报价和定价结构（公开）
//! - [`pricing`] - 定价文档管理（后台）
//! - [`orders`] - 结账（公开）和订单管理（后台）
//! - [`gallery`] - 作品图库
//! - [`pages`] - 页面文案
//! - [`contact`] - 联系表单
//!
//! 后台路由统一挂 [`crate::auth::require_admin`] 中间件；公开路由不认证。

pub mod auth;
pub mod cakes;
pub mod contact;
pub mod gallery;
pub mod health;
pub mod orders;
pub mod pages;
pub mod pricing;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::core::{Config, ServerState};

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble the full application router.
pub fn router(state: ServerState) -> Router {
    let public = Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(cakes::router())
        .merge(orders::public_router())
        .merge(gallery::public_router())
        .merge(pages::public_router())
        .merge(contact::public_router());

    let admin = Router::new()
        .merge(auth::session_router())
        .merge(pricing::router())
        .merge(orders::admin_router())
        .merge(gallery::admin_router())
        .merge(pages::admin_router())
        .merge(contact::admin_router())
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// CORS: a configured origin locks the API to the storefront frontend;
/// no origin means development and stays permissive.
fn cors_layer(config: &Config) -> CorsLayer {
    match config
        .cors_origin
        .as_deref()
        .and_then(|o| o.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}
