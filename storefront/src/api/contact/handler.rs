//! Contact Form API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::contact as contact_repo;
use crate::utils::validation::{
    MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::AppResult;

use shared::models::{ContactMessage, ContactMessageCreate};

const LIST_LIMIT: i64 = 200;

/// POST /api/contact - 提交联系表单
///
/// 消息先入库，再转发到店铺邮箱；邮件失败只记日志，提交照样成功。
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<ContactMessageCreate>,
) -> AppResult<Json<ContactMessage>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email, "email")?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.message, "message", MAX_MESSAGE_LEN)?;

    let message = contact_repo::create(&state.pool, payload).await?;
    tracing::info!(from = %message.email, "Contact message received");

    state.mailer.send_contact_notification(&message).await;

    Ok(Json(message))
}

/// GET /api/admin/contact - 留言列表（新的在前）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ContactMessage>>> {
    let messages = contact_repo::find_all(&state.pool, LIST_LIMIT).await?;
    Ok(Json(messages))
}
