//! Page Content API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::page_content as page_repo;
use crate::utils::validation::validate_slug;
use crate::utils::{AppError, AppResult};

use shared::models::{PageContent, PageContentUpdate};

/// GET /api/pages/:slug - 页面文案（公开）
pub async fn get(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PageContent>> {
    validate_slug(&slug)?;
    let page = page_repo::get(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Page {slug} not found")))?;
    Ok(Json(page))
}

/// PUT /api/admin/pages/:slug - 整块替换页面文案
pub async fn update(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Json(payload): Json<PageContentUpdate>,
) -> AppResult<Json<PageContent>> {
    validate_slug(&slug)?;
    let page = page_repo::upsert(&state.pool, &slug, &payload.content).await?;
    tracing::info!(slug = %slug, "Page content updated");
    Ok(Json(page))
}
