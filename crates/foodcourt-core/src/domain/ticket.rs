// ============================================================================
// Foodcourt Core - Queue Ticket Entity
// File: crates/foodcourt-core/src/domain/ticket.rs
// Description: Daily sequential queue ticket scoped to one tenant
// ============================================================================

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodcourt_shared::constants::TICKET_LABEL_PREFIX;

/// Queue ticket status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Waiting,
    Called,
    Done,
    Cancelled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Waiting => "WAITING",
            TicketStatus::Called => "CALLED",
            TicketStatus::Done => "DONE",
            TicketStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "WAITING" => Some(TicketStatus::Waiting),
            "CALLED" => Some(TicketStatus::Called),
            "DONE" => Some(TicketStatus::Done),
            "CANCELLED" => Some(TicketStatus::Cancelled),
            _ => None,
        }
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Waiting
    }
}

/// Queue ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,

    /// Sequence label scoped to (tenant, day), e.g. "A-3".
    pub number: String,

    pub tenant_id: Uuid,

    /// The paid order that produced this ticket. Walk-in tickets
    /// have no order reference.
    pub order_id: Option<String>,

    pub status: TicketStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Format the Nth ticket label of the day.
pub fn day_label(seq: i64) -> String {
    format!("{}-{}", TICKET_LABEL_PREFIX, seq)
}

/// Calendar date of `now` in the venue's timezone. Used as the
/// uniqueness scope for ticket labels; sequences reset when it rolls
/// over at local midnight.
pub fn day_key(now: DateTime<Utc>, offset_hours: i32) -> NaiveDate {
    (now + Duration::hours(i64::from(offset_hours))).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_label_format() {
        assert_eq!(day_label(1), "A-1");
        assert_eq!(day_label(12), "A-12");
    }

    #[test]
    fn test_day_key_utc() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(day_key(now, 0), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_day_key_rolls_over_with_offset() {
        // 23:30 UTC on Mar 5 is already Mar 6 at UTC+7.
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 23, 30, 0).unwrap();
        assert_eq!(day_key(now, 0), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(day_key(now, 7), NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TicketStatus::Waiting,
            TicketStatus::Called,
            TicketStatus::Done,
            TicketStatus::Cancelled,
        ] {
            assert_eq!(TicketStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(TicketStatus::from_str("SERVED"), None);
    }
}
