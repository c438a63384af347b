//! Order Repository
//!
//! Order lines are stored as a JSON column; the row struct parses them back
//! into [`OrderItem`]s on the way out.

use super::{RepoError, RepoResult};
use sqlx::{FromRow, SqlitePool};

use shared::models::{Order, OrderItem, OrderStatus};
use shared::util::now_millis;

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    reference: String,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    pickup_date: Option<String>,
    items: String,
    total_price: i64,
    status: OrderStatus,
    created_at: i64,
    updated_at: i64,
}

impl OrderRow {
    fn into_order(self) -> RepoResult<Order> {
        let items: Vec<OrderItem> = serde_json::from_str(&self.items)?;
        Ok(Order {
            id: self.id,
            reference: self.reference,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            pickup_date: self.pickup_date,
            items,
            total_price: self.total_price,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, reference, customer_name, customer_email, customer_phone, \
                              pickup_date, items, total_price, status, created_at, updated_at";

/// Persist a fully-built order (id, reference and totals already stamped).
pub async fn create(pool: &SqlitePool, order: &Order) -> RepoResult<()> {
    let items_json = serde_json::to_string(&order.items)?;
    sqlx::query(
        "INSERT INTO orders (id, reference, customer_name, customer_email, customer_phone, \
         pickup_date, items, total_price, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )
    .bind(order.id)
    .bind(&order.reference)
    .bind(&order.customer_name)
    .bind(&order.customer_email)
    .bind(&order.customer_phone)
    .bind(&order.pickup_date)
    .bind(items_json)
    .bind(order.total_price)
    .bind(order.status)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// List orders newest-first, optionally filtered by status.
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, OrderRow>(&format!(
                "SELECT {SELECT_COLUMNS} FROM orders WHERE status = ? ORDER BY created_at DESC LIMIT ?"
            ))
            .bind(status)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, OrderRow>(&format!(
                "SELECT {SELECT_COLUMNS} FROM orders ORDER BY created_at DESC LIMIT ?"
            ))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    rows.into_iter().map(OrderRow::into_order).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {SELECT_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(OrderRow::into_order).transpose()
}

/// Compare-and-swap status update: only succeeds when the row still holds
/// `from`, so two admins racing on the same order cannot double-apply a
/// transition.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<Order> {
    let result = sqlx::query(
        "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(now_millis())
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::Validation(format!(
            "Order {id} is no longer in status {from}"
        )));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}
