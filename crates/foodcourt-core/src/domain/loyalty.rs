// ============================================================================
// Foodcourt Core - Loyalty Point Calculator
// File: crates/foodcourt-core/src/domain/loyalty.rs
// Description: Point award with the quiet-tenant double-points promotion
// ============================================================================

use chrono::{DateTime, Utc};

use foodcourt_shared::constants::{IDLE_PROMOTION_MINUTES, PROMOTION_MULTIPLIER};

use crate::domain::order::OrderItem;

/// Tenant queue state read *before* the new ticket is inserted.
///
/// The promotion decision must see the pre-transition history; the
/// ticket produced by the paying order would otherwise reset the
/// tenant's "last activity" and disqualify the promotion it earned.
#[derive(Debug, Clone, Default)]
pub struct QueueSnapshot {
    /// Creation time of the most recent ticket, any status.
    pub last_ticket_at: Option<DateTime<Utc>>,
    /// Current WAITING-ticket count.
    pub waiting_count: i64,
}

/// Computed point award for a just-paid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointAward {
    pub total_quantity: i64,
    pub multiplier: i32,
    pub points: i32,
}

/// Compute the loyalty award for a paid order.
///
/// Doubled when the tenant has no ticket history at all (new-tenant
/// bootstrap), or when it has been idle for at least 45 minutes with
/// nobody waiting (quiet-tenant promotion).
pub fn point_award(items: &[OrderItem], snapshot: &QueueSnapshot, now: DateTime<Utc>) -> PointAward {
    // Zero/negative quantities floor to 1 per line.
    let total_quantity: i64 = items.iter().map(|item| item.qty.max(1)).sum();

    let promoted = match snapshot.last_ticket_at {
        None => true,
        Some(last) => {
            let idle_minutes = now.signed_duration_since(last).num_minutes();
            idle_minutes >= IDLE_PROMOTION_MINUTES && snapshot.waiting_count == 0
        }
    };
    let multiplier = if promoted { PROMOTION_MULTIPLIER } else { 1 };

    let points = i32::try_from(total_quantity)
        .unwrap_or(i32::MAX)
        .saturating_mul(multiplier);

    PointAward { total_quantity, multiplier, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn items(quantities: &[i64]) -> Vec<OrderItem> {
        quantities
            .iter()
            .map(|&qty| OrderItem { name: "Seblak".into(), price: 15000, qty })
            .collect()
    }

    fn snapshot(idle_minutes: i64, waiting: i64, now: DateTime<Utc>) -> QueueSnapshot {
        QueueSnapshot {
            last_ticket_at: Some(now - Duration::minutes(idle_minutes)),
            waiting_count: waiting,
        }
    }

    #[test]
    fn test_fresh_tenant_always_doubles() {
        let now = Utc::now();
        let award = point_award(&items(&[2, 3]), &QueueSnapshot::default(), now);
        assert_eq!(award.total_quantity, 5);
        assert_eq!(award.multiplier, 2);
        assert_eq!(award.points, 10);
    }

    #[test]
    fn test_idle_quiet_tenant_doubles() {
        let now = Utc::now();
        let award = point_award(&items(&[1, 1]), &snapshot(50, 0, now), now);
        assert_eq!(award.multiplier, 2);
        assert_eq!(award.points, 4);
    }

    #[test]
    fn test_exactly_45_minutes_doubles() {
        let now = Utc::now();
        let award = point_award(&items(&[1]), &snapshot(45, 0, now), now);
        assert_eq!(award.multiplier, 2);
    }

    #[test]
    fn test_recent_activity_single_points() {
        let now = Utc::now();
        let award = point_award(&items(&[3]), &snapshot(10, 0, now), now);
        assert_eq!(award.multiplier, 1);
        assert_eq!(award.points, 3);
    }

    #[test]
    fn test_waiting_customers_block_promotion() {
        let now = Utc::now();
        let award = point_award(&items(&[2]), &snapshot(50, 1, now), now);
        assert_eq!(award.multiplier, 1);
        assert_eq!(award.points, 2);
    }

    #[test]
    fn test_zero_and_negative_quantities_floor_to_one() {
        let now = Utc::now();
        let award = point_award(&items(&[0, -3, 2]), &snapshot(10, 2, now), now);
        assert_eq!(award.total_quantity, 4);
        assert_eq!(award.points, 4);
    }

    #[test]
    fn test_no_items_awards_nothing() {
        let now = Utc::now();
        let award = point_award(&[], &QueueSnapshot::default(), now);
        assert_eq!(award.points, 0);
    }
}
