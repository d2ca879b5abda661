//! # Foodcourt Core - Domain Module
//!
//! Domain entities and pure business rules.

pub mod customer;
pub mod loyalty;
pub mod order;
pub mod payment;
pub mod tenant;
pub mod ticket;

// Re-export all entities and enums
pub use customer::Customer;
pub use loyalty::{point_award, PointAward, QueueSnapshot};
pub use order::{Order, OrderItem, OrderStatus};
pub use payment::{PaymentNotification, PaymentResolution};
pub use tenant::{CrowdStatus, Tenant};
pub use ticket::{day_key, day_label, Ticket, TicketStatus};
