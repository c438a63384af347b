//! Gallery API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::gallery as gallery_repo;
use crate::services::InstagramEmbed;
use crate::utils::validation::{MAX_NAME_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

use shared::models::{GalleryItem, GalleryItemCreate, GalleryItemUpdate};

/// GET /api/gallery - 图库列表（按 position 排序）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<GalleryItem>>> {
    let items = gallery_repo::find_all(&state.pool).await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct EmbedQuery {
    pub url: String,
}

/// GET /api/gallery/instagram?url=... - Instagram 嵌入代码
pub async fn instagram_embed(
    State(state): State<ServerState>,
    Query(query): Query<EmbedQuery>,
) -> AppResult<Json<InstagramEmbed>> {
    let embed = state.instagram.fetch_embed(&query.url).await?;
    Ok(Json(embed))
}

/// POST /api/admin/gallery - 新增图库条目
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GalleryItemCreate>,
) -> AppResult<Json<GalleryItem>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.image_url, "image url", MAX_URL_LEN)?;
    validate_optional_text(&payload.instagram_url, "instagram url", MAX_URL_LEN)?;

    let item = gallery_repo::create(&state.pool, payload).await?;
    Ok(Json(item))
}

/// PUT /api/admin/gallery/:id - 更新图库条目
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GalleryItemUpdate>,
) -> AppResult<Json<GalleryItem>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.image_url, "image url", MAX_URL_LEN)?;
    validate_optional_text(&payload.instagram_url, "instagram url", MAX_URL_LEN)?;

    let item = gallery_repo::update(&state.pool, id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/admin/gallery/:id - 删除图库条目
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = gallery_repo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Gallery item {id} not found")));
    }
    Ok(Json(true))
}
