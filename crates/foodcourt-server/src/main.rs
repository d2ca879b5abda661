use axum::{routing::get, routing::patch, routing::post, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use foodcourt_api::handlers::{health, orders, payments, queues};
use foodcourt_api::state::AppState;
use foodcourt_core::services::{OrderService, PaymentWebhookService, QueueService};
use foodcourt_infrastructure::{
    create_pool, PgCustomerRepository, PgOrderRepository, PgPaymentRepository,
    PgTenantRepository, PgTicketRepository,
};
use foodcourt_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    foodcourt_shared::telemetry::init_telemetry();

    info!("Foodcourt server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Database connection established.");

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied.");

    // Wire repositories and services
    let tz = config.app.timezone_offset_hours;
    let payment_repo = Arc::new(PgPaymentRepository::new(pool.clone(), tz));
    let order_repo = Arc::new(PgOrderRepository::new(pool.clone()));
    let customer_repo = Arc::new(PgCustomerRepository::new(pool.clone()));
    let tenant_repo = Arc::new(PgTenantRepository::new(pool.clone()));
    let ticket_repo = Arc::new(PgTicketRepository::new(pool.clone(), tz));

    let state = AppState {
        webhooks: Arc::new(PaymentWebhookService::new(payment_repo)),
        orders: Arc::new(OrderService::new(order_repo, customer_repo, tenant_repo.clone())),
        queues: Arc::new(QueueService::new(ticket_repo, tenant_repo)),
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Payment gateway webhook
        .route("/api/v1/payments/notification", post(payments::handle_notification))
        // Orders
        .route("/api/v1/orders/checkout", post(orders::checkout))
        .route("/api/v1/orders/{order_id}", get(orders::get_order))
        // Queues
        .route("/api/v1/queues/join", post(queues::join_queue))
        .route("/api/v1/queues/{ticket_id}/status", patch(queues::update_ticket_status))
        .route("/api/v1/queues/{tenant_id}/info", get(queues::queue_info))
        .route("/api/v1/queues/{tenant_id}/dashboard", get(queues::dashboard))
        // Add State
        .with_state(state)
        // Layers
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
