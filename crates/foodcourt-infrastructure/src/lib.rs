//! # Foodcourt Infrastructure
//!
//! PostgreSQL implementations (adapters) of the core repository ports.

pub mod database;

pub use database::{
    create_pool, PgCustomerRepository, PgOrderRepository, PgPaymentRepository,
    PgTenantRepository, PgTicketRepository,
};
