//! Gallery Repository

use super::{RepoError, RepoResult};
use sqlx::SqlitePool;

use shared::models::{GalleryItem, GalleryItemCreate, GalleryItemUpdate};
use shared::util::{now_millis, snowflake_id};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<GalleryItem>> {
    let items = sqlx::query_as::<_, GalleryItem>(
        "SELECT id, title, image_url, instagram_url, position, created_at \
         FROM gallery_item ORDER BY position, created_at",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<GalleryItem>> {
    let item = sqlx::query_as::<_, GalleryItem>(
        "SELECT id, title, image_url, instagram_url, position, created_at \
         FROM gallery_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: GalleryItemCreate) -> RepoResult<GalleryItem> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO gallery_item (id, title, image_url, instagram_url, position, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.image_url)
    .bind(&data.instagram_url)
    .bind(data.position.unwrap_or(0))
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create gallery item".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: GalleryItemUpdate,
) -> RepoResult<GalleryItem> {
    let rows = sqlx::query(
        "UPDATE gallery_item SET \
           title = COALESCE(?1, title), \
           image_url = COALESCE(?2, image_url), \
           instagram_url = COALESCE(?3, instagram_url), \
           position = COALESCE(?4, position) \
         WHERE id = ?5",
    )
    .bind(&data.title)
    .bind(&data.image_url)
    .bind(&data.instagram_url)
    .bind(data.position)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Gallery item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Gallery item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM gallery_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn sample() -> GalleryItemCreate {
        GalleryItemCreate {
            title: "Ube heart cake".into(),
            image_url: "/uploads/ube-heart.jpg".into(),
            instagram_url: Some("https://www.instagram.com/p/abc123/".into()),
            position: Some(2),
        }
    }

    #[tokio::test]
    async fn crud_cycle() {
        let db = DbService::new_in_memory().await.unwrap();
        let created = create(&db.pool, sample()).await.unwrap();
        assert_eq!(created.position, 2);

        let updated = update(
            &db.pool,
            created.id,
            GalleryItemUpdate {
                title: Some("Ube heart (3 layers)".into()),
                ..GalleryItemUpdate::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Ube heart (3 layers)");
        assert_eq!(updated.image_url, created.image_url);

        assert!(delete(&db.pool, created.id).await.unwrap());
        assert!(!delete(&db.pool, created.id).await.unwrap());
        assert!(find_all(&db.pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_orders_by_position() {
        let db = DbService::new_in_memory().await.unwrap();
        for (title, position) in [("b", 5), ("a", 1), ("c", 9)] {
            let mut data = sample();
            data.title = title.into();
            data.position = Some(position);
            create(&db.pool, data).await.unwrap();
        }
        let titles: Vec<String> = find_all(&db.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
