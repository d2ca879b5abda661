// ============================================================================
// Foodcourt Core - Payment Notification
// File: crates/foodcourt-core/src/domain/payment.rs
// Description: Gateway notification payload and status vocabulary mapping
// ============================================================================

use serde::Deserialize;

/// Asynchronous payment notification as delivered by the gateway.
///
/// `transaction_status` and `fraud_status` carry the gateway's own
/// vocabulary; anything unrecognized resolves to a no-op so that new
/// gateway statuses never break the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentNotification {
    pub order_id: String,
    pub transaction_status: String,
    #[serde(default)]
    pub fraud_status: Option<String>,
}

/// Internal effect of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentResolution {
    Paid,
    Cancelled,
    NoOp,
}

impl PaymentNotification {
    /// Translate the gateway status vocabulary.
    ///
    /// | transaction_status      | fraud_status | effect    |
    /// |-------------------------|--------------|-----------|
    /// | settlement              | -            | Paid      |
    /// | capture                 | accept       | Paid      |
    /// | capture                 | challenge    | NoOp      |
    /// | cancel / deny / expire  | -            | Cancelled |
    /// | anything else           | -            | NoOp      |
    pub fn resolution(&self) -> PaymentResolution {
        match self.transaction_status.as_str() {
            "settlement" => PaymentResolution::Paid,
            "capture" => match self.fraud_status.as_deref() {
                Some("accept") => PaymentResolution::Paid,
                // "challenge" or anything unexpected: wait for the
                // gateway to settle before touching the order.
                _ => PaymentResolution::NoOp,
            },
            "cancel" | "deny" | "expire" => PaymentResolution::Cancelled,
            _ => PaymentResolution::NoOp,
        }
    }
}
