//! Cake Quote API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::pricing;
use crate::utils::AppResult;

use shared::client::QuoteResponse;
use shared::models::CakeConfiguration;

/// POST /api/cakes/price - 计算蛋糕配置的报价
///
/// 每次调用都从磁盘读取最新定价文档，管理员的修改立即生效。
pub async fn price(
    State(state): State<ServerState>,
    Json(config): Json<CakeConfiguration>,
) -> AppResult<Json<QuoteResponse>> {
    let doc = state.pricing.load().await?;
    let breakdown = pricing::quote(&config, &doc)?;
    Ok(Json(QuoteResponse::from(breakdown)))
}

/// GET /api/pricing-structure - 当前定价文档（公开只读）
///
/// 返回磁盘上的文档原样，前端向导用它渲染选项价格。
pub async fn pricing_structure(
    State(state): State<ServerState>,
) -> AppResult<Json<serde_json::Value>> {
    let doc = state.pricing.load_raw().await?;
    Ok(Json(doc))
}
