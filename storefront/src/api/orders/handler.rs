//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::order as order_repo;
use crate::pricing;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

use shared::client::{CheckoutItem, CheckoutRequest, CheckoutResponse, OrderStatusUpdate};
use shared::models::{Order, OrderItem, OrderStatus, PricingDocument};
use shared::util::{now_millis, snowflake_id};

/// Upper bound on cart lines; the wizard UI caps well below this.
const MAX_ORDER_ITEMS: usize = 20;

const DEFAULT_LIST_LIMIT: i64 = 100;

/// POST /api/orders - checkout
///
/// Prices every line against the current pricing document, stamps the total
/// onto the order row, then fires the confirmation emails. Email failure is
/// logged and swallowed; the order is already placed.
pub async fn checkout(
    State(state): State<ServerState>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    validate_checkout(&req)?;

    let doc = state.pricing.load().await?;
    let items = price_items(&req.items, &doc)?;
    let total_price: i64 = items.iter().map(OrderItem::line_total).sum();

    let now = now_millis();
    let order = Order {
        id: snowflake_id(),
        reference: new_reference(),
        customer_name: req.customer.name.trim().to_string(),
        customer_email: req.customer.email.trim().to_string(),
        customer_phone: req.customer.phone.clone(),
        pickup_date: req.pickup_date.clone(),
        items,
        total_price,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    order_repo::create(&state.pool, &order).await?;
    tracing::info!(
        reference = %order.reference,
        total = order.total_price,
        items = order.items.len(),
        "Order placed"
    );

    // Best-effort notifications; never fail the checkout over email.
    state.mailer.send_order_confirmation(&order).await;
    state.mailer.send_order_notification(&order).await;

    Ok(Json(CheckoutResponse {
        order_id: order.id,
        reference: order.reference,
        total_price: order.total_price,
    }))
}

fn validate_checkout(req: &CheckoutRequest) -> AppResult<()> {
    validate_required_text(&req.customer.name, "customer name", MAX_NAME_LEN)?;
    validate_email(&req.customer.email, "customer email")?;
    validate_optional_text(&req.customer.phone, "customer phone", MAX_SHORT_TEXT_LEN)?;

    if let Some(date) = &req.pickup_date
        && chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
    {
        return Err(AppError::validation(format!(
            "pickup date must be YYYY-MM-DD (got {date})"
        )));
    }

    if req.items.is_empty() {
        return Err(AppError::validation("order must contain at least one item"));
    }
    if req.items.len() > MAX_ORDER_ITEMS {
        return Err(AppError::validation(format!(
            "order may contain at most {MAX_ORDER_ITEMS} items"
        )));
    }
    Ok(())
}

fn price_items(items: &[CheckoutItem], doc: &PricingDocument) -> AppResult<Vec<OrderItem>> {
    items
        .iter()
        .map(|item| match item {
            CheckoutItem::Custom { config } => {
                let breakdown = pricing::quote(config, doc)?;
                Ok(OrderItem::Custom {
                    config: config.clone(),
                    breakdown,
                })
            }
            CheckoutItem::Specialty {
                category,
                item_key,
                quantity,
            } => {
                let cake = doc.specialty(category, item_key).ok_or_else(|| {
                    AppError::validation(format!(
                        "unknown specialty item: {category}/{item_key}"
                    ))
                })?;
                let quantity = (*quantity).max(1);
                let unit_price = cake.price.max(0);
                Ok(OrderItem::Specialty {
                    category: category.clone(),
                    item_key: item_key.clone(),
                    name: cake.name.clone(),
                    quantity,
                    unit_price,
                    line_total: unit_price * quantity,
                })
            }
        })
        .collect()
}

/// Order references are short, human-readable and unique enough for a shop
/// ("CK-9F3A21D4"); the row id stays the canonical key.
fn new_reference() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("CK-{}", uuid[..8].to_uppercase())
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub limit: Option<i64>,
}

/// GET /api/admin/orders - 订单列表（可按状态过滤）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, 1000);
    let orders = order_repo::find_all(&state.pool, query.status, limit).await?;
    Ok(Json(orders))
}

/// GET /api/admin/orders/:id - 单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = order_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;
    Ok(Json(order))
}

/// PATCH /api/admin/orders/:id/status - 状态流转
///
/// pending -> confirmed -> completed；cancelled 只能从非终态进入。
/// 非法流转返回 422。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(update): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = order_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

    if order.status == update.status {
        return Ok(Json(order));
    }
    if !order.status.can_transition_to(update.status) {
        return Err(AppError::business_rule(format!(
            "cannot move order from {} to {}",
            order.status, update.status
        )));
    }

    let updated = order_repo::update_status(&state.pool, id, order.status, update.status).await?;
    tracing::info!(reference = %updated.reference, status = %updated.status, "Order status updated");
    Ok(Json(updated))
}
