// ============================================================================
// Foodcourt Infrastructure - PostgreSQL Order Repository
// File: crates/foodcourt-infrastructure/src/database/postgres/order_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use foodcourt_core::domain::{Order, OrderItem, OrderStatus};
use foodcourt_core::error::DomainError;
use foodcourt_core::repositories::OrderRepository;

use super::map_db_err;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping, shared with the payment adapter.
#[derive(Debug, FromRow)]
pub(crate) struct OrderRow {
    pub id: String,
    pub total_amount: i64,
    pub items: serde_json::Value,
    pub status: String,
    pub ticket_number: Option<String>,
    pub points_awarded: Option<i32>,
    pub tenant_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub(crate) const ORDER_COLUMNS: &str = "id, total_amount, items, status, ticket_number, \
     points_awarded, tenant_id, customer_id, created_at, updated_at";

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        let items: Vec<OrderItem> = serde_json::from_value(row.items).unwrap_or_default();
        Order {
            id: row.id,
            total_amount: row.total_amount,
            items,
            status: OrderStatus::from_str(&row.status).unwrap_or_default(),
            ticket_number: row.ticket_number,
            points_awarded: row.points_awarded,
            tenant_id: row.tenant_id,
            customer_id: row.customer_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order, DomainError> {
        info!("Creating order {} for tenant {}", order.id, order.tenant_id);

        let items = serde_json::to_value(&order.items)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        let row: OrderRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO orders (
                id, total_amount, items, status, ticket_number,
                points_awarded, tenant_id, customer_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&order.id)
        .bind(order.total_amount)
        .bind(items)
        .bind(order.status.as_str())
        .bind(&order.ticket_number)
        .bind(order.points_awarded)
        .bind(order.tenant_id)
        .bind(order.customer_id)
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating order: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(|r| r.into()))
    }
}
