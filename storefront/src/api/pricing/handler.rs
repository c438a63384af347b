//! Pricing Admin API Handlers

use axum::{Extension, Json, extract::State};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::AppResult;

use shared::client::ReplacePricingResponse;
use shared::models::PricingBackupInfo;

/// GET /api/admin/pricing - 当前定价文档
pub async fn get_document(
    State(state): State<ServerState>,
) -> AppResult<Json<serde_json::Value>> {
    let doc = state.pricing.load_raw().await?;
    Ok(Json(doc))
}

/// PUT /api/admin/pricing - 整体替换定价文档
///
/// 校验失败返回 400（消息里带出错的字段路径），替换成功前会先对
/// 当前文档做时间戳备份。
pub async fn replace_document(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Json(replacement): Json<serde_json::Value>,
) -> AppResult<Json<ReplacePricingResponse>> {
    let backup = state.pricing.replace(&replacement).await?;

    tracing::info!(username = %admin.username, backup = %backup, "Pricing document updated");

    Ok(Json(ReplacePricingResponse {
        message: "Pricing updated".to_string(),
        backup,
    }))
}

/// GET /api/admin/pricing/backups - 备份快照列表（新的在前）
pub async fn list_backups(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PricingBackupInfo>>> {
    let backups = state.pricing.list_backups().await?;
    Ok(Json(backups))
}
