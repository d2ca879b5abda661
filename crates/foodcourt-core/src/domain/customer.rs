// ============================================================================
// Foodcourt Core - Customer Entity
// File: crates/foodcourt-core/src/domain/customer.rs
// ============================================================================
//! Customer loyalty projection. Created lazily on first checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Customer {
    pub id: Uuid,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub phone: Option<String>,

    /// Accumulated loyalty points. Only ever increases, exactly once
    /// per paid order.
    pub points: i32,

    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(email: String, phone: Option<String>) -> Result<Self, validator::ValidationErrors> {
        let customer = Self {
            id: Uuid::new_v4(),
            email: email.trim().to_lowercase(),
            phone,
            points: 0,
            created_at: Utc::now(),
        };

        customer.validate()?;
        Ok(customer)
    }
}
