// ============================================================================
// Foodcourt Core - Payment Webhook Service
// File: crates/foodcourt-core/src/services/payment_webhook_service.rs
// ============================================================================
//! Entry point for asynchronous payment-status notifications.
//!
//! Translates the gateway vocabulary, guards idempotency, and hands
//! terminal transitions to the transactional repository. Every
//! business outcome acknowledges success to the gateway; only
//! infrastructure faults bubble up as retryable errors.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{PaymentNotification, PaymentResolution};
use crate::error::DomainError;
use crate::repositories::{PaidReceipt, PaymentRepository};

/// Outcome of one webhook delivery. All variants are acknowledged
/// with success; the gateway must stop retrying in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Stale or mistaken notification for an unknown order id.
    OrderNotFound,
    /// The order was already PAID or CANCELLED (idempotency hit).
    AlreadyFinal,
    /// The gateway status maps to no internal effect.
    Ignored,
    /// First terminal notification: order paid, ticket and points issued.
    Paid(PaidReceipt),
    /// First terminal notification: order cancelled.
    Cancelled,
}

/// Coordinates the order lifecycle, ticket allocator, loyalty
/// calculator, and crowd estimator for each incoming notification.
pub struct PaymentWebhookService<R: PaymentRepository> {
    repo: Arc<R>,
}

impl<R: PaymentRepository> PaymentWebhookService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Process one gateway notification.
    pub async fn handle_notification(
        &self,
        notification: &PaymentNotification,
    ) -> Result<WebhookOutcome, DomainError> {
        info!(
            "Webhook received: {} - {}",
            notification.order_id, notification.transaction_status
        );

        // 1. Look up the order
        let Some(order) = self.repo.find_order(&notification.order_id).await? else {
            warn!("Webhook for unknown order: {}", notification.order_id);
            return Ok(WebhookOutcome::OrderNotFound);
        };

        // 2. Idempotency gate: terminal orders never move again. The
        //    repository re-checks this inside the transaction; this
        //    early exit just avoids useless work on retries.
        if order.is_terminal() {
            info!(
                "Webhook no-op: order {} already {}",
                order.id,
                order.status.as_str()
            );
            return Ok(WebhookOutcome::AlreadyFinal);
        }

        // 3. Translate gateway vocabulary and apply
        match notification.resolution() {
            PaymentResolution::NoOp => {
                info!(
                    "Webhook ignored: {} ({}/{})",
                    order.id,
                    notification.transaction_status,
                    notification.fraud_status.as_deref().unwrap_or("-")
                );
                Ok(WebhookOutcome::Ignored)
            }
            PaymentResolution::Paid => {
                match self.repo.finalize_paid(&order, Utc::now()).await? {
                    Some(receipt) => {
                        info!(
                            "Order {} PAID: ticket {}, {} points, tenant now {}",
                            order.id,
                            receipt.ticket_number,
                            receipt.points_awarded,
                            receipt.crowd_status.as_str()
                        );
                        Ok(WebhookOutcome::Paid(receipt))
                    }
                    None => {
                        // Lost the race against a concurrent first
                        // notification; that commit already did the work.
                        info!("Order {} finalized concurrently, no-op", order.id);
                        Ok(WebhookOutcome::AlreadyFinal)
                    }
                }
            }
            PaymentResolution::Cancelled => {
                if self.repo.finalize_cancelled(&order.id).await? {
                    info!("Order {} CANCELLED", order.id);
                    Ok(WebhookOutcome::Cancelled)
                } else {
                    info!("Order {} finalized concurrently, no-op", order.id);
                    Ok(WebhookOutcome::AlreadyFinal)
                }
            }
        }
    }
}
