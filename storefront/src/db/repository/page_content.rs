//! Page Content Repository (keyed singleton rows)

use super::RepoResult;
use sqlx::{FromRow, SqlitePool};

use shared::models::PageContent;
use shared::util::now_millis;

#[derive(Debug, FromRow)]
struct PageContentRow {
    slug: String,
    content: String,
    updated_at: i64,
}

impl PageContentRow {
    fn into_page(self) -> RepoResult<PageContent> {
        let content = serde_json::from_str(&self.content)?;
        Ok(PageContent {
            slug: self.slug,
            content,
            updated_at: self.updated_at,
        })
    }
}

pub async fn get(pool: &SqlitePool, slug: &str) -> RepoResult<Option<PageContent>> {
    let row = sqlx::query_as::<_, PageContentRow>(
        "SELECT slug, content, updated_at FROM page_content WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    row.map(PageContentRow::into_page).transpose()
}

/// Replace a page's copy wholesale, creating the row on first write.
pub async fn upsert(
    pool: &SqlitePool,
    slug: &str,
    content: &serde_json::Value,
) -> RepoResult<PageContent> {
    let now = now_millis();
    let content_json = serde_json::to_string(content)?;
    sqlx::query(
        "INSERT INTO page_content (slug, content, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(slug) DO UPDATE SET
           content = excluded.content,
           updated_at = excluded.updated_at",
    )
    .bind(slug)
    .bind(content_json)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(PageContent {
        slug: slug.to_string(),
        content: content.clone(),
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_creates_then_replaces() {
        let db = DbService::new_in_memory().await.unwrap();
        assert!(get(&db.pool, "home").await.unwrap().is_none());

        upsert(&db.pool, "home", &json!({"headline": "Cakes!"}))
            .await
            .unwrap();
        upsert(&db.pool, "home", &json!({"headline": "Fresh cakes!"}))
            .await
            .unwrap();

        let page = get(&db.pool, "home").await.unwrap().unwrap();
        assert_eq!(page.content["headline"], "Fresh cakes!");
    }
}
