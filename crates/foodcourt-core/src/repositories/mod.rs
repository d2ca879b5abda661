//! Repository traits (ports)

pub mod customer_repository;
pub mod order_repository;
pub mod payment_repository;
pub mod tenant_repository;
pub mod ticket_repository;

pub use customer_repository::CustomerRepository;
pub use order_repository::OrderRepository;
pub use payment_repository::{PaidReceipt, PaymentRepository};
pub use tenant_repository::TenantRepository;
pub use ticket_repository::{OrderSummary, QueueEntry, QueueInfo, TicketRepository};
