//! 认证中间件
//!
//! 为管理后台路由提供会话认证的 Axum 中间件。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::core::ServerState;

/// The authenticated admin, injected into request extensions by
/// [`require_admin`]. Handlers read it with `Extension<CurrentAdmin>`.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub username: String,
    /// Session creation time, Unix millis
    pub logged_in_at: i64,
    /// The bearer token that authenticated this request (used by logout)
    pub token: String,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// 认证中间件 - 要求有效的管理员会话
///
/// 从 `Authorization: Bearer <token>` 头提取令牌并在会话存储中查找。
/// 查找成功后将 [`CurrentAdmin`] 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 头格式错误 | 401 InvalidToken |
/// | 令牌未知或已过期 | 401 InvalidToken |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => extract_bearer(header).ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(uri = %req.uri(), "Admin request without authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.sessions.get(token).await {
        Some(session) => {
            let admin = CurrentAdmin {
                username: session.username,
                logged_in_at: session.created_at,
                token: token.to_string(),
            };
            req.extensions_mut().insert(admin);
            Ok(next.run(req).await)
        }
        None => {
            tracing::warn!(uri = %req.uri(), "Admin request with unknown or expired token");
            Err(AppError::InvalidToken)
        }
    }
}
