// ============================================================================
// Foodcourt API - Queue Handlers
// File: crates/foodcourt-api/src/handlers/queues.rs
// ============================================================================
//! Walk-in joins, staff ticket actions, and queue reads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::domain::{Ticket, TicketStatus};
use foodcourt_core::repositories::QueueEntry;
use foodcourt_core::services::QueueStatusView;

use crate::response::{domain_error_response, ApiResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct JoinQueueRequest {
    pub tenant_id: Uuid,
    pub order_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct TicketResponse {
    pub ticket_id: Uuid,
    pub number: String,
    pub tenant_id: Uuid,
    pub order_id: Option<String>,
    pub status: String,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            ticket_id: ticket.id,
            number: ticket.number,
            tenant_id: ticket.tenant_id,
            order_id: ticket.order_id,
            status: ticket.status.as_str().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct QueueInfoResponse {
    pub tenant_id: Uuid,
    pub waiting_count: i64,
    pub current_number: String,
    pub estimated_wait_minutes: i64,
    pub is_crowded: bool,
}

impl From<QueueStatusView> for QueueInfoResponse {
    fn from(view: QueueStatusView) -> Self {
        Self {
            tenant_id: view.tenant_id,
            waiting_count: view.waiting_count,
            current_number: view.current_number,
            estimated_wait_minutes: view.estimated_wait_minutes,
            is_crowded: view.is_crowded,
        }
    }
}

#[derive(Serialize)]
pub struct DashboardItem {
    pub number: String,
    pub status: String,
    pub wait_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<DashboardOrder>,
}

#[derive(Serialize)]
pub struct DashboardOrder {
    pub order_id: String,
    pub total_amount: i64,
    pub item_count: usize,
    pub customer_email: Option<String>,
}

impl DashboardItem {
    fn from_entry(entry: QueueEntry, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            number: entry.ticket.number,
            status: entry.ticket.status.as_str().to_string(),
            wait_minutes: (now - entry.ticket.created_at).num_minutes().max(0),
            order: entry.order.map(|o| DashboardOrder {
                order_id: o.order_id,
                total_amount: o.total_amount,
                item_count: o.items.len(),
                customer_email: o.customer_email,
            }),
        }
    }
}

/// POST /api/v1/queues/join
pub async fn join_queue(
    State(state): State<AppState>,
    Json(payload): Json<JoinQueueRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TicketResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    let ticket = state
        .queues
        .join_queue(&payload.tenant_id, payload.order_id.as_deref())
        .await
        .map_err(|e| domain_error_response(&e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ticket.into()))))
}

/// PATCH /api/v1/queues/{ticket_id}/status
pub async fn update_ticket_status(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(payload): Json<UpdateTicketStatusRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let Some(status) = TicketStatus::from_str(&payload.status) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "VALIDATION_ERROR",
                &format!("Unknown ticket status: {}", payload.status),
            )),
        ));
    };

    let ticket = state
        .queues
        .update_status(&ticket_id, status)
        .await
        .map_err(|e| domain_error_response(&e))?;
    Ok(Json(ApiResponse::success(ticket.into())))
}

/// GET /api/v1/queues/{tenant_id}/info
pub async fn queue_info(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<ApiResponse<QueueInfoResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let view = state
        .queues
        .queue_info(&tenant_id)
        .await
        .map_err(|e| domain_error_response(&e))?;
    Ok(Json(ApiResponse::success(view.into())))
}

/// GET /api/v1/queues/{tenant_id}/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<DashboardItem>>>, (StatusCode, Json<ApiResponse<()>>)> {
    let entries = state
        .queues
        .dashboard(&tenant_id)
        .await
        .map_err(|e| domain_error_response(&e))?;

    let now = chrono::Utc::now();
    let items = entries
        .into_iter()
        .map(|entry| DashboardItem::from_entry(entry, now))
        .collect();
    Ok(Json(ApiResponse::success(items)))
}
