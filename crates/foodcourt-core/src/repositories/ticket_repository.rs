//! Ticket repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{OrderItem, Ticket, TicketStatus};
use crate::error::DomainError;

/// Public queue state for one tenant.
#[derive(Debug, Clone)]
pub struct QueueInfo {
    pub waiting_count: i64,
    /// Label of the most recently CALLED ticket, if any.
    pub current_number: Option<String>,
}

/// Order summary attached to a dashboard entry.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order_id: String,
    pub total_amount: i64,
    pub items: Vec<OrderItem>,
    pub customer_email: Option<String>,
}

/// One row of the tenant staff dashboard.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub ticket: Ticket,
    pub order: Option<OrderSummary>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Issue the next day-scoped ticket for a tenant, serialized per
    /// tenant, and refresh the crowd status in the same transaction.
    async fn issue<'a>(
        &self,
        tenant_id: &Uuid,
        order_id: Option<&'a str>,
        now: DateTime<Utc>,
    ) -> Result<Ticket, DomainError>;

    /// Staff action: CALLED / DONE / CANCELLED. Refreshes the crowd
    /// status in the same transaction.
    async fn set_status(&self, ticket_id: &Uuid, status: TicketStatus)
        -> Result<Ticket, DomainError>;

    async fn queue_info(&self, tenant_id: &Uuid) -> Result<QueueInfo, DomainError>;

    /// WAITING and CALLED tickets, oldest first, with order summaries.
    async fn active_for_tenant(&self, tenant_id: &Uuid) -> Result<Vec<QueueEntry>, DomainError>;
}
