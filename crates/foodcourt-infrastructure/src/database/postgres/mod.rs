//! PostgreSQL repository implementations

pub mod customer_repo_impl;
pub mod order_repo_impl;
pub mod payment_repo_impl;
pub mod tenant_repo_impl;
pub mod ticket_repo_impl;

pub use customer_repo_impl::PgCustomerRepository;
pub use order_repo_impl::PgOrderRepository;
pub use payment_repo_impl::PgPaymentRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use ticket_repo_impl::PgTicketRepository;

use sqlx::PgConnection;
use tracing::error;
use uuid::Uuid;

use foodcourt_core::domain::CrowdStatus;
use foodcourt_core::error::DomainError;

pub(crate) fn map_db_err(e: sqlx::Error) -> DomainError {
    error!("Database error: {}", e);
    DomainError::DatabaseError(e.to_string())
}

/// Map a ticket insert failure. A unique violation on
/// (tenant_id, day_key, number) means two allocations observed the
/// same pre-insert count; the whole unit must fail and be retried.
pub(crate) fn map_ticket_insert_err(e: sqlx::Error, tenant_id: Uuid) -> DomainError {
    if let sqlx::Error::Database(ref db) = e {
        if db.is_unique_violation() {
            error!("Duplicate ticket label for tenant {}", tenant_id);
            return DomainError::TicketNumberConflict(tenant_id);
        }
    }
    map_db_err(e)
}

/// Recompute the tenant's crowd status from the authoritative WAITING
/// count and persist it. Must run inside the same transaction as the
/// ticket mutation that triggered it.
pub(crate) async fn refresh_crowd_status(
    conn: &mut PgConnection,
    tenant_id: &Uuid,
) -> Result<CrowdStatus, sqlx::Error> {
    let (waiting,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM tickets WHERE tenant_id = $1 AND status = 'WAITING'",
    )
    .bind(tenant_id)
    .fetch_one(&mut *conn)
    .await?;

    let status = CrowdStatus::from_waiting_count(waiting);

    sqlx::query("UPDATE tenants SET status = $2, is_trending = $3 WHERE id = $1")
        .bind(tenant_id)
        .bind(status.as_str())
        .bind(status.is_trending())
        .execute(conn)
        .await?;

    Ok(status)
}
