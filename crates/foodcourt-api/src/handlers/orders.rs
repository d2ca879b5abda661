// ============================================================================
// Foodcourt API - Order Handlers
// File: crates/foodcourt-api/src/handlers/orders.rs
// ============================================================================
//! Checkout and order lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_core::domain::{Order, OrderItem};
use foodcourt_core::services::CheckoutCommand;

use crate::response::{domain_error_response, ApiResponse};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub email: String,
    pub phone: Option<String>,
    pub total_amount: i64,
    pub tenant_id: Uuid,
    pub items: Vec<CheckoutItem>,
}

#[derive(Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub qty: i64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub status: String,
    pub total_amount: i64,
    pub items: Vec<OrderItem>,
    pub ticket_number: Option<String>,
    pub points_awarded: Option<i32>,
    pub tenant_id: Uuid,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            status: order.status.as_str().to_string(),
            total_amount: order.total_amount,
            items: order.items,
            ticket_number: order.ticket_number,
            points_awarded: order.points_awarded,
            tenant_id: order.tenant_id,
        }
    }
}

/// POST /api/v1/orders/checkout
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), (StatusCode, Json<ApiResponse<()>>)> {
    if payload.items.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("VALIDATION_ERROR", "Order needs at least one item")),
        ));
    }

    let command = CheckoutCommand {
        email: payload.email,
        phone: payload.phone,
        total_amount: payload.total_amount,
        tenant_id: payload.tenant_id,
        items: payload
            .items
            .into_iter()
            .map(|i| OrderItem { name: i.name, price: i.price, qty: i.qty })
            .collect(),
    };

    let order = state
        .orders
        .checkout(command)
        .await
        .map_err(|e| domain_error_response(&e))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(order.into()))))
}

/// GET /api/v1/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<OrderResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    let order = state
        .orders
        .get_order(&order_id)
        .await
        .map_err(|e| domain_error_response(&e))?;
    Ok(Json(ApiResponse::success(order.into())))
}
