//! Contact Message Repository

use super::{RepoError, RepoResult};
use sqlx::SqlitePool;

use shared::models::{ContactMessage, ContactMessageCreate};
use shared::util::{now_millis, snowflake_id};

pub async fn create(pool: &SqlitePool, data: ContactMessageCreate) -> RepoResult<ContactMessage> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO contact_message (id, name, email, phone, message, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.message)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to store contact message".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ContactMessage>> {
    let message = sqlx::query_as::<_, ContactMessage>(
        "SELECT id, name, email, phone, message, created_at FROM contact_message WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(message)
}

pub async fn find_all(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<ContactMessage>> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT id, name, email, phone, message, created_at \
         FROM contact_message ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn stores_and_lists_newest_first() {
        let db = DbService::new_in_memory().await.unwrap();
        for body in ["first", "second"] {
            create(
                &db.pool,
                ContactMessageCreate {
                    name: "Pat".into(),
                    email: "pat@example.com".into(),
                    phone: None,
                    message: body.into(),
                },
            )
            .await
            .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let all = find_all(&db.pool, 10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message, "second");
    }
}
