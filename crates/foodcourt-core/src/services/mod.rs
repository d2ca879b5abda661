//! Domain services (business logic)

pub mod order_service;
pub mod payment_webhook_service;
pub mod queue_service;

pub use order_service::{CheckoutCommand, OrderService};
pub use payment_webhook_service::{PaymentWebhookService, WebhookOutcome};
pub use queue_service::{QueueService, QueueStatusView};
