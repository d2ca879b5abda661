// ============================================================================
// Foodcourt Infrastructure - PostgreSQL Ticket Repository
// File: crates/foodcourt-infrastructure/src/database/postgres/ticket_repo_impl.rs
// Description: Day-scoped ticket allocation and queue reads
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use foodcourt_core::domain::{day_key, day_label, OrderItem, Ticket, TicketStatus};
use foodcourt_core::error::DomainError;
use foodcourt_core::repositories::{OrderSummary, QueueEntry, QueueInfo, TicketRepository};

use super::{map_db_err, map_ticket_insert_err, refresh_crowd_status};

pub struct PgTicketRepository {
    pool: PgPool,
    timezone_offset_hours: i32,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool, timezone_offset_hours: i32) -> Self {
        Self { pool, timezone_offset_hours }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TicketRow {
    pub id: Uuid,
    pub number: String,
    pub tenant_id: Uuid,
    pub order_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            number: row.number,
            tenant_id: row.tenant_id,
            order_id: row.order_id,
            status: TicketStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct DashboardRow {
    pub id: Uuid,
    pub number: String,
    pub tenant_id: Uuid,
    pub order_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub total_amount: Option<i64>,
    pub items: Option<serde_json::Value>,
    pub customer_email: Option<String>,
}

impl From<DashboardRow> for QueueEntry {
    fn from(row: DashboardRow) -> Self {
        let order = match (&row.order_id, row.total_amount) {
            (Some(order_id), Some(total_amount)) => Some(OrderSummary {
                order_id: order_id.clone(),
                total_amount,
                items: row
                    .items
                    .clone()
                    .and_then(|v| serde_json::from_value::<Vec<OrderItem>>(v).ok())
                    .unwrap_or_default(),
                customer_email: row.customer_email.clone(),
            }),
            _ => None,
        };
        QueueEntry {
            ticket: Ticket {
                id: row.id,
                number: row.number,
                tenant_id: row.tenant_id,
                order_id: row.order_id,
                status: TicketStatus::from_str(&row.status).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            order,
        }
    }
}

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn issue<'a>(
        &self,
        tenant_id: &Uuid,
        order_id: Option<&'a str>,
        now: DateTime<Utc>,
    ) -> Result<Ticket, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        // Per-tenant serialization point: two concurrent issuances
        // for the same tenant must not observe the same count.
        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tenants WHERE id = $1 FOR UPDATE")
            .bind(tenant_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_err)?;
        if locked.is_none() {
            return Err(DomainError::TenantNotFound);
        }

        let day = day_key(now, self.timezone_offset_hours);
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets WHERE tenant_id = $1 AND day_key = $2",
        )
        .bind(tenant_id)
        .bind(day)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        let number = day_label(count + 1);
        let row: TicketRow = sqlx::query_as(
            r#"
            INSERT INTO tickets (id, number, tenant_id, order_id, status, day_key, created_at)
            VALUES ($1, $2, $3, $4, 'WAITING', $5, $6)
            RETURNING id, number, tenant_id, order_id, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&number)
        .bind(tenant_id)
        .bind(order_id)
        .bind(day)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_ticket_insert_err(e, *tenant_id))?;

        refresh_crowd_status(&mut tx, tenant_id).await.map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        info!("Ticket {} issued for tenant {}", number, tenant_id);
        Ok(row.into())
    }

    async fn set_status(
        &self,
        ticket_id: &Uuid,
        status: TicketStatus,
    ) -> Result<Ticket, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            UPDATE tickets
            SET status = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, number, tenant_id, order_id, status, created_at, updated_at
            "#,
        )
        .bind(ticket_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_err)?;

        let Some(row) = row else {
            return Err(DomainError::TicketNotFound);
        };

        refresh_crowd_status(&mut tx, &row.tenant_id).await.map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;
        Ok(row.into())
    }

    async fn queue_info(&self, tenant_id: &Uuid) -> Result<QueueInfo, DomainError> {
        let (waiting_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets WHERE tenant_id = $1 AND status = 'WAITING'",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        let current: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT number FROM tickets
            WHERE tenant_id = $1 AND status = 'CALLED'
            ORDER BY updated_at DESC NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(QueueInfo { waiting_count, current_number: current.map(|(n,)| n) })
    }

    async fn active_for_tenant(&self, tenant_id: &Uuid) -> Result<Vec<QueueEntry>, DomainError> {
        let rows: Vec<DashboardRow> = sqlx::query_as(
            r#"
            SELECT
                t.id, t.number, t.tenant_id, t.order_id, t.status,
                t.created_at, t.updated_at,
                o.total_amount, o.items, c.email AS customer_email
            FROM tickets t
            LEFT JOIN orders o ON o.id = t.order_id
            LEFT JOIN customers c ON c.id = o.customer_id
            WHERE t.tenant_id = $1 AND t.status IN ('WAITING', 'CALLED')
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
