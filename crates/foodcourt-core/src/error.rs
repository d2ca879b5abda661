//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Tenant not found")]
    TenantNotFound,

    #[error("Ticket not found")]
    TicketNotFound,

    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Ticket number conflict for tenant {0}")]
    TicketNumberConflict(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Whether the caller should retry. Payment gateways retry their
    /// notifications on non-success responses, which is safe because
    /// finalization is idempotent.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::DatabaseError(_)
                | DomainError::TicketNumberConflict(_)
                | DomainError::InternalError(_)
        )
    }
}
