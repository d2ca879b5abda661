// ============================================================================
// Foodcourt Core - Order Entity
// File: crates/foodcourt-core/src/domain/order.rs
// Description: Order entity with a strictly one-way lifecycle
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status.
///
/// PENDING is the only non-terminal state. Once an order is PAID or
/// CANCELLED no further transition is permitted, no matter how many
/// times the payment gateway re-delivers a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(OrderStatus::Pending),
            "PAID" => Some(OrderStatus::Paid),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A single ordered line item. Stored as opaque JSON on the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub qty: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Order {
    /// Externally-visible id, used as the gateway transaction reference.
    pub id: String,

    #[validate(range(min = 1, message = "Total amount must be positive"))]
    pub total_amount: i64,

    pub items: Vec<OrderItem>,

    pub status: OrderStatus,

    /// Assigned queue ticket label, set when the order is paid.
    pub ticket_number: Option<String>,

    /// Loyalty points awarded, set when the order is paid.
    pub points_awarded: Option<i32>,

    pub tenant_id: Uuid,

    /// Guest orders may lack a resolved customer.
    pub customer_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create a PENDING order at checkout time. The id doubles as the
    /// payment gateway's transaction reference.
    pub fn new(
        total_amount: i64,
        items: Vec<OrderItem>,
        tenant_id: Uuid,
        customer_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Self, validator::ValidationErrors> {
        let order = Self {
            id: format!("ORDER-{}", now.timestamp_millis()),
            total_amount,
            items,
            status: OrderStatus::Pending,
            ticket_number: None,
            points_awarded: None,
            tenant_id,
            customer_id,
            created_at: now,
            updated_at: None,
        };

        order.validate()?;
        Ok(order)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
