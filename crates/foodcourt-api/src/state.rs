use std::sync::Arc;

use foodcourt_core::services::{OrderService, PaymentWebhookService, QueueService};
use foodcourt_infrastructure::{
    PgCustomerRepository, PgOrderRepository, PgPaymentRepository, PgTenantRepository,
    PgTicketRepository,
};
use foodcourt_shared::config::AppConfig;

pub type WebhookService = PaymentWebhookService<PgPaymentRepository>;
pub type Orders = OrderService<PgOrderRepository, PgCustomerRepository, PgTenantRepository>;
pub type Queues = QueueService<PgTicketRepository, PgTenantRepository>;

#[derive(Clone)]
pub struct AppState {
    pub webhooks: Arc<WebhookService>,
    pub orders: Arc<Orders>,
    pub queues: Arc<Queues>,
    pub config: AppConfig,
}
