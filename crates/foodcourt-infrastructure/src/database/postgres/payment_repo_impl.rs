// ============================================================================
// Foodcourt Infrastructure - PostgreSQL Payment Repository
// File: crates/foodcourt-infrastructure/src/database/postgres/payment_repo_impl.rs
// Description: The atomic finalize unit behind the payment webhook
// ============================================================================
//! Order status flip, ticket allocation, point award, customer
//! balance, and crowd status are applied in ONE transaction. A
//! partially-applied payment confirmation must be impossible.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use foodcourt_core::domain::{day_key, day_label, point_award, Order, QueueSnapshot};
use foodcourt_core::error::DomainError;
use foodcourt_core::repositories::{PaidReceipt, PaymentRepository};

use super::order_repo_impl::{OrderRow, ORDER_COLUMNS};
use super::{map_db_err, map_ticket_insert_err, refresh_crowd_status};

pub struct PgPaymentRepository {
    pool: PgPool,
    timezone_offset_hours: i32,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool, timezone_offset_hours: i32) -> Self {
        Self { pool, timezone_offset_hours }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_order(&self, order_id: &str) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn finalize_paid(
        &self,
        order: &Order,
        now: DateTime<Utc>,
    ) -> Result<Option<PaidReceipt>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        // Serialize ticket allocation per tenant for the whole unit.
        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tenants WHERE id = $1 FOR UPDATE")
            .bind(order.tenant_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_err)?;
        if locked.is_none() {
            return Err(DomainError::TenantNotFound);
        }

        // Status flip guarded on PENDING: the idempotency gate applied
        // as one conditional write, not a separate check-then-act.
        let flipped = sqlx::query(
            "UPDATE orders SET status = 'PAID', updated_at = $2 WHERE id = $1 AND status = 'PENDING'",
        )
        .bind(&order.id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;
        if flipped.rows_affected() == 0 {
            // A concurrent notification got here first.
            tx.rollback().await.map_err(map_db_err)?;
            return Ok(None);
        }

        // Queue snapshot BEFORE the new ticket exists; the promotion
        // must see the tenant's pre-transition history.
        let (last_ticket_at, waiting_count): (Option<DateTime<Utc>>, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT MAX(created_at) FROM tickets WHERE tenant_id = $1),
                (SELECT COUNT(*) FROM tickets WHERE tenant_id = $1 AND status = 'WAITING')
            "#,
        )
        .bind(order.tenant_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        let award = point_award(
            &order.items,
            &QueueSnapshot { last_ticket_at, waiting_count },
            now,
        );

        // Next day-scoped ticket label.
        let day = day_key(now, self.timezone_offset_hours);
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tickets WHERE tenant_id = $1 AND day_key = $2",
        )
        .bind(order.tenant_id)
        .bind(day)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;
        let number = day_label(count + 1);

        sqlx::query(
            r#"
            INSERT INTO tickets (id, number, tenant_id, order_id, status, day_key, created_at)
            VALUES ($1, $2, $3, $4, 'WAITING', $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&number)
        .bind(order.tenant_id)
        .bind(&order.id)
        .bind(day)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_ticket_insert_err(e, order.tenant_id))?;

        sqlx::query("UPDATE orders SET ticket_number = $2, points_awarded = $3 WHERE id = $1")
            .bind(&order.id)
            .bind(&number)
            .bind(award.points)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        if let Some(customer_id) = order.customer_id {
            sqlx::query("UPDATE customers SET points = points + $2 WHERE id = $1")
                .bind(customer_id)
                .bind(award.points)
                .execute(&mut *tx)
                .await
                .map_err(map_db_err)?;
        }

        let crowd_status = refresh_crowd_status(&mut tx, &order.tenant_id)
            .await
            .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        info!(
            "Finalized order {} as PAID: ticket {}, {} points (x{})",
            order.id, number, award.points, award.multiplier
        );
        Ok(Some(PaidReceipt {
            ticket_number: number,
            points_awarded: award.points,
            crowd_status,
        }))
    }

    async fn finalize_cancelled(&self, order_id: &str) -> Result<bool, DomainError> {
        // Single guarded statement; atomic on its own.
        let result = sqlx::query(
            "UPDATE orders SET status = 'CANCELLED', updated_at = $2 WHERE id = $1 AND status = 'PENDING'",
        )
        .bind(order_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
