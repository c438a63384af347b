//! Order Model
//!
//! 订单实体：结账时定格价格（total_price 美分），之后定价文档的修改
//! 不影响已下的订单。

use serde::{Deserialize, Serialize};

use super::cake::{CakeConfiguration, PriceBreakdown};
use super::pricing::Cents;

/// Order lifecycle state.
///
/// pending -> confirmed -> completed, with cancelled reachable from any
/// non-terminal state. completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether a transition to `next` is allowed.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// One line of an order: either a wizard-configured custom cake with its
/// frozen price breakdown, or a fixed-price specialty catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OrderItem {
    #[serde(rename_all = "camelCase")]
    Custom {
        config: CakeConfiguration,
        breakdown: PriceBreakdown,
    },
    #[serde(rename_all = "camelCase")]
    Specialty {
        category: String,
        item_key: String,
        name: String,
        quantity: i64,
        unit_price: Cents,
        line_total: Cents,
    },
}

impl OrderItem {
    /// The line's contribution to the order total, in cents.
    pub fn line_total(&self) -> Cents {
        match self {
            OrderItem::Custom { breakdown, .. } => breakdown.total_price,
            OrderItem::Specialty { line_total, .. } => *line_total,
        }
    }

    /// Short human label for receipts and admin listings.
    pub fn label(&self) -> String {
        match self {
            OrderItem::Custom { config, .. } => {
                format!("Custom cake x{}", config.cake_count())
            }
            OrderItem::Specialty { name, quantity, .. } => format!("{name} x{quantity}"),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Human-readable order code shown in confirmation emails
    pub reference: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    /// Requested pickup date (YYYY-MM-DD)
    pub pickup_date: Option<String>,
    /// Order lines (stored as a JSON column, populated by the repository)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Total stamped at checkout, cents
    pub total_price: Cents,
    pub status: OrderStatus,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}
