//! Payment finalization port
//!
//! The adapter behind this trait owns the single atomic unit of the
//! webhook path: order status flip, ticket allocation, point award,
//! customer balance, and crowd status commit together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::domain::{CrowdStatus, Order};
use crate::error::DomainError;

/// Result of a successful PENDING -> PAID finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidReceipt {
    pub ticket_number: String,
    pub points_awarded: i32,
    pub crowd_status: CrowdStatus,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_order(&self, order_id: &str) -> Result<Option<Order>, DomainError>;

    /// Finalize a pending order as PAID in one transaction:
    /// serialize on the tenant, flip the status guarded on PENDING,
    /// read the pre-insert queue snapshot, compute the award,
    /// allocate the next day-scoped ticket label, credit the
    /// customer, and refresh the tenant crowd status.
    ///
    /// Returns `None` when a concurrent notification already made the
    /// order terminal; nothing is applied in that case.
    async fn finalize_paid(
        &self,
        order: &Order,
        now: DateTime<Utc>,
    ) -> Result<Option<PaidReceipt>, DomainError>;

    /// Finalize a pending order as CANCELLED. No ticket, no points.
    ///
    /// Returns `false` when the order was already terminal.
    async fn finalize_cancelled(&self, order_id: &str) -> Result<bool, DomainError>;
}
