// ============================================================================
// Foodcourt Core - Tenant Entity
// File: crates/foodcourt-core/src/domain/tenant.rs
// Description: Tenant stall with derived crowd status
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_shared::constants::{BUSY_WAITING_THRESHOLD, MODERATE_WAITING_THRESHOLD};

/// Derived crowd status shown on tenant cards.
///
/// Always a pure function of the current WAITING-ticket count, never
/// an independently maintained counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrowdStatus {
    Quiet,
    Moderate,
    Busy,
}

impl CrowdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdStatus::Quiet => "QUIET",
            CrowdStatus::Moderate => "MODERATE",
            CrowdStatus::Busy => "BUSY",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "QUIET" => Some(CrowdStatus::Quiet),
            "MODERATE" => Some(CrowdStatus::Moderate),
            "BUSY" => Some(CrowdStatus::Busy),
            _ => None,
        }
    }

    /// Derive the status from the current WAITING count.
    pub fn from_waiting_count(waiting: i64) -> Self {
        if waiting > BUSY_WAITING_THRESHOLD {
            CrowdStatus::Busy
        } else if waiting > MODERATE_WAITING_THRESHOLD {
            CrowdStatus::Moderate
        } else {
            CrowdStatus::Quiet
        }
    }

    /// The UI highlights BUSY tenants as trending.
    pub fn is_trending(&self) -> bool {
        matches!(self, CrowdStatus::Busy)
    }
}

impl Default for CrowdStatus {
    fn default() -> Self {
        CrowdStatus::Quiet
    }
}

/// Tenant entity (crowd-status projection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub status: CrowdStatus,
    pub is_trending: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_counts() {
        assert_eq!(CrowdStatus::from_waiting_count(0), CrowdStatus::Quiet);
        assert_eq!(CrowdStatus::from_waiting_count(2), CrowdStatus::Quiet);
        assert_eq!(CrowdStatus::from_waiting_count(3), CrowdStatus::Moderate);
        assert_eq!(CrowdStatus::from_waiting_count(5), CrowdStatus::Moderate);
        assert_eq!(CrowdStatus::from_waiting_count(6), CrowdStatus::Busy);
    }

    #[test]
    fn test_trending_only_when_busy() {
        assert!(CrowdStatus::from_waiting_count(6).is_trending());
        assert!(!CrowdStatus::from_waiting_count(5).is_trending());
        assert!(!CrowdStatus::from_waiting_count(0).is_trending());
    }
}
