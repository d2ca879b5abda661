//! Application-wide constants

/// Waiting-ticket count above which a tenant is BUSY (and trending).
pub const BUSY_WAITING_THRESHOLD: i64 = 5;

/// Waiting-ticket count above which a tenant is MODERATE.
pub const MODERATE_WAITING_THRESHOLD: i64 = 2;

/// Idle minutes since the last issued ticket before the quiet-tenant
/// double-points promotion applies.
pub const IDLE_PROMOTION_MINUTES: i64 = 45;

/// Point multiplier applied by the double-points promotion.
pub const PROMOTION_MULTIPLIER: i32 = 2;

/// Day prefix for ticket labels (A-1, A-2, ...).
pub const TICKET_LABEL_PREFIX: &str = "A";

/// Rough per-ticket service time used for the wait estimate shown
/// on the public queue info endpoint.
pub const ESTIMATED_MINUTES_PER_TICKET: i64 = 3;
