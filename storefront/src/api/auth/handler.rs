//! Authentication Handlers
//!
//! Handles admin login, logout, and session introspection

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use uuid::Uuid;

use crate::AppError;
use crate::auth::{CurrentAdmin, Session};
use crate::core::ServerState;
use crate::db::repository::admin_user;

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, LoginResponse, SessionInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Verifies credentials against the admin_user table and opens a session.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = admin_user::find_by_username(&state.pool, &req.username)
        .await
        .map_err(AppError::from)?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = Uuid::new_v4().simple().to_string();
    let session = Session::new(&user.username);
    let expires_at = session.created_at + state.sessions.ttl_millis();
    state.sessions.insert(token.clone(), session).await;

    tracing::info!(username = %user.username, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        expires_at,
    }))
}

/// GET /api/auth/me - current session info
pub async fn me(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Json<SessionInfo> {
    Json(SessionInfo {
        username: admin.username,
        logged_in_at: admin.logged_in_at,
        expires_at: admin.logged_in_at + state.sessions.ttl_millis(),
    })
}

/// POST /api/auth/logout - drop the current session
pub async fn logout(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Json<serde_json::Value> {
    state.sessions.remove(&admin.token).await;
    tracing::info!(username = %admin.username, "Admin logged out");
    Json(serde_json::json!({ "message": "Logged out" }))
}
