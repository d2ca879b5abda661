// ============================================================================
// Foodcourt API - Payment Handlers
// File: crates/foodcourt-api/src/handlers/payments.rs
// ============================================================================
//! Gateway webhook endpoint.
//!
//! Business outcomes always acknowledge 200 so the gateway stops
//! retrying; only infrastructure faults return an error status.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;

use foodcourt_core::domain::PaymentNotification;
use foodcourt_core::services::WebhookOutcome;

use crate::response::{domain_error_response, ApiResponse};
use crate::state::AppState;

#[derive(Serialize)]
pub struct WebhookAck {
    pub order_id: String,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_awarded: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crowd_status: Option<String>,
}

/// POST /api/v1/payments/notification
pub async fn handle_notification(
    State(state): State<AppState>,
    Json(notification): Json<PaymentNotification>,
) -> Result<Json<ApiResponse<WebhookAck>>, (StatusCode, Json<ApiResponse<()>>)> {
    let order_id = notification.order_id.clone();

    let outcome = state
        .webhooks
        .handle_notification(&notification)
        .await
        .map_err(|e| {
            error!("Webhook processing failed for {}: {}", order_id, e);
            domain_error_response(&e)
        })?;

    let ack = match outcome {
        WebhookOutcome::Paid(receipt) => WebhookAck {
            order_id,
            result: "PAID".to_string(),
            ticket_number: Some(receipt.ticket_number),
            points_awarded: Some(receipt.points_awarded),
            crowd_status: Some(receipt.crowd_status.as_str().to_string()),
        },
        WebhookOutcome::Cancelled => ack_without_receipt(order_id, "CANCELLED"),
        WebhookOutcome::AlreadyFinal => ack_without_receipt(order_id, "ALREADY_FINAL"),
        WebhookOutcome::Ignored => ack_without_receipt(order_id, "IGNORED"),
        WebhookOutcome::OrderNotFound => ack_without_receipt(order_id, "ORDER_NOT_FOUND"),
    };
    Ok(Json(ApiResponse::success(ack)))
}

fn ack_without_receipt(order_id: String, result: &str) -> WebhookAck {
    WebhookAck {
        order_id,
        result: result.to_string(),
        ticket_number: None,
        points_awarded: None,
        crowd_status: None,
    }
}
