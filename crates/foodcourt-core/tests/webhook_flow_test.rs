//! End-to-end webhook coordination scenarios against an in-memory
//! repository that mirrors the transactional finalize semantics.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use foodcourt_core::domain::{
    day_key, day_label, point_award, CrowdStatus, Order, OrderItem, OrderStatus,
    PaymentNotification, QueueSnapshot, TicketStatus,
};
use foodcourt_core::error::DomainError;
use foodcourt_core::repositories::{PaidReceipt, PaymentRepository};
use foodcourt_core::services::{PaymentWebhookService, WebhookOutcome};

#[derive(Debug, Clone)]
struct StoredTicket {
    tenant_id: Uuid,
    number: String,
    status: TicketStatus,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct State {
    orders: HashMap<String, Order>,
    tickets: Vec<StoredTicket>,
    customer_points: HashMap<Uuid, i32>,
    tenant_status: HashMap<Uuid, CrowdStatus>,
}

/// In-memory stand-in for the PostgreSQL adapter. The single mutex
/// plays the role of the per-tenant lock plus transaction: every
/// finalize is applied as one indivisible step.
#[derive(Default)]
struct InMemoryPaymentRepository {
    state: Mutex<State>,
}

impl InMemoryPaymentRepository {
    fn seed_order(&self, order: Order) {
        let mut state = self.state.lock().unwrap();
        if let Some(customer_id) = order.customer_id {
            state.customer_points.entry(customer_id).or_insert(0);
        }
        state.orders.insert(order.id.clone(), order);
    }

    fn seed_ticket(&self, tenant_id: Uuid, number: &str, status: TicketStatus, created_at: DateTime<Utc>) {
        self.state.lock().unwrap().tickets.push(StoredTicket {
            tenant_id,
            number: number.into(),
            status,
            created_at,
        });
    }

    fn ticket_count(&self, tenant_id: Uuid) -> usize {
        self.state
            .lock()
            .unwrap()
            .tickets
            .iter()
            .filter(|t| t.tenant_id == tenant_id)
            .count()
    }

    fn points_of(&self, customer_id: Uuid) -> i32 {
        *self
            .state
            .lock()
            .unwrap()
            .customer_points
            .get(&customer_id)
            .unwrap_or(&0)
    }

    fn order_status(&self, order_id: &str) -> OrderStatus {
        self.state.lock().unwrap().orders[order_id].status
    }

    fn crowd_status(&self, tenant_id: Uuid) -> CrowdStatus {
        self.state
            .lock()
            .unwrap()
            .tenant_status
            .get(&tenant_id)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_order(&self, order_id: &str) -> Result<Option<Order>, DomainError> {
        Ok(self.state.lock().unwrap().orders.get(order_id).cloned())
    }

    async fn finalize_paid(
        &self,
        order: &Order,
        now: DateTime<Utc>,
    ) -> Result<Option<PaidReceipt>, DomainError> {
        let mut state = self.state.lock().unwrap();

        // Guarded status flip: only a PENDING order moves.
        let stored = state
            .orders
            .get(&order.id)
            .ok_or_else(|| DomainError::OrderNotFound(order.id.clone()))?;
        if stored.status.is_terminal() {
            return Ok(None);
        }
        let tenant_id = stored.tenant_id;
        let customer_id = stored.customer_id;
        let items = stored.items.clone();

        // Pre-insert queue snapshot feeds the promotion decision.
        let snapshot = QueueSnapshot {
            last_ticket_at: state
                .tickets
                .iter()
                .filter(|t| t.tenant_id == tenant_id)
                .map(|t| t.created_at)
                .max(),
            waiting_count: state
                .tickets
                .iter()
                .filter(|t| t.tenant_id == tenant_id && t.status == TicketStatus::Waiting)
                .count() as i64,
        };
        let award = point_award(&items, &snapshot, now);

        // Allocate the next day-scoped label.
        let today = day_key(now, 0);
        let seq = state
            .tickets
            .iter()
            .filter(|t| t.tenant_id == tenant_id && day_key(t.created_at, 0) == today)
            .count() as i64
            + 1;
        let number = day_label(seq);

        state.tickets.push(StoredTicket {
            tenant_id,
            number: number.clone(),
            status: TicketStatus::Waiting,
            created_at: now,
        });

        let entry = state.orders.get_mut(&order.id).expect("checked above");
        entry.status = OrderStatus::Paid;
        entry.ticket_number = Some(number.clone());
        entry.points_awarded = Some(award.points);

        if let Some(customer_id) = customer_id {
            *state.customer_points.entry(customer_id).or_insert(0) += award.points;
        }

        let waiting = state
            .tickets
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.status == TicketStatus::Waiting)
            .count() as i64;
        let crowd_status = CrowdStatus::from_waiting_count(waiting);
        state.tenant_status.insert(tenant_id, crowd_status);

        Ok(Some(PaidReceipt { ticket_number: number, points_awarded: award.points, crowd_status }))
    }

    async fn finalize_cancelled(&self, order_id: &str) -> Result<bool, DomainError> {
        let mut state = self.state.lock().unwrap();
        let entry = state
            .orders
            .get_mut(order_id)
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))?;
        if entry.status.is_terminal() {
            return Ok(false);
        }
        entry.status = OrderStatus::Cancelled;
        Ok(true)
    }
}

fn pending_order(id: &str, tenant_id: Uuid, customer_id: Uuid, quantities: &[i64]) -> Order {
    Order {
        id: id.into(),
        total_amount: 45000,
        items: quantities
            .iter()
            .map(|&qty| OrderItem { name: "Seblak".into(), price: 15000, qty })
            .collect(),
        status: OrderStatus::Pending,
        ticket_number: None,
        points_awarded: None,
        tenant_id,
        customer_id: Some(customer_id),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn settlement(order_id: &str) -> PaymentNotification {
    PaymentNotification {
        order_id: order_id.into(),
        transaction_status: "settlement".into(),
        fraud_status: None,
    }
}

#[tokio::test]
async fn first_paid_order_gets_first_ticket_and_double_points() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    repo.seed_order(pending_order("ORDER-1", tenant_id, customer_id, &[2, 3]));

    let service = PaymentWebhookService::new(repo.clone());
    let outcome = service.handle_notification(&settlement("ORDER-1")).await.unwrap();

    match outcome {
        WebhookOutcome::Paid(receipt) => {
            assert_eq!(receipt.ticket_number, "A-1");
            // Fresh tenant: 5 items doubled.
            assert_eq!(receipt.points_awarded, 10);
        }
        other => panic!("expected Paid, got {:?}", other),
    }
    assert_eq!(repo.order_status("ORDER-1"), OrderStatus::Paid);
    assert_eq!(repo.points_of(customer_id), 10);
    assert_eq!(repo.ticket_count(tenant_id), 1);
    assert_eq!(repo.crowd_status(tenant_id), CrowdStatus::Quiet);
}

#[tokio::test]
async fn redelivered_notification_changes_nothing() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    repo.seed_order(pending_order("ORDER-1", tenant_id, customer_id, &[2, 3]));

    let service = PaymentWebhookService::new(repo.clone());
    service.handle_notification(&settlement("ORDER-1")).await.unwrap();

    for _ in 0..3 {
        let outcome = service.handle_notification(&settlement("ORDER-1")).await.unwrap();
        assert_eq!(outcome, WebhookOutcome::AlreadyFinal);
    }
    assert_eq!(repo.ticket_count(tenant_id), 1);
    assert_eq!(repo.points_of(customer_id), 10);
}

#[tokio::test]
async fn second_order_gets_next_label_and_single_points() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    repo.seed_order(pending_order("ORDER-1", tenant_id, customer_id, &[2, 3]));
    repo.seed_order(pending_order("ORDER-2", tenant_id, customer_id, &[4]));

    let service = PaymentWebhookService::new(repo.clone());
    service.handle_notification(&settlement("ORDER-1")).await.unwrap();
    let outcome = service.handle_notification(&settlement("ORDER-2")).await.unwrap();

    match outcome {
        WebhookOutcome::Paid(receipt) => {
            assert_eq!(receipt.ticket_number, "A-2");
            // One ticket is WAITING now, so no promotion.
            assert_eq!(receipt.points_awarded, 4);
        }
        other => panic!("expected Paid, got {:?}", other),
    }
    assert_eq!(repo.points_of(customer_id), 14);
}

#[tokio::test]
async fn idle_quiet_tenant_doubles_points() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    // Last activity 50 minutes ago, already served.
    repo.seed_ticket(tenant_id, "A-1", TicketStatus::Done, Utc::now() - Duration::minutes(50));
    repo.seed_order(pending_order("ORDER-9", tenant_id, customer_id, &[3]));

    let service = PaymentWebhookService::new(repo.clone());
    let outcome = service.handle_notification(&settlement("ORDER-9")).await.unwrap();

    match outcome {
        WebhookOutcome::Paid(receipt) => assert_eq!(receipt.points_awarded, 6),
        other => panic!("expected Paid, got {:?}", other),
    }
}

#[tokio::test]
async fn cancelled_order_never_becomes_paid() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    repo.seed_order(pending_order("ORDER-1", tenant_id, customer_id, &[1]));

    let service = PaymentWebhookService::new(repo.clone());
    let expire = PaymentNotification {
        order_id: "ORDER-1".into(),
        transaction_status: "expire".into(),
        fraud_status: None,
    };
    assert_eq!(
        service.handle_notification(&expire).await.unwrap(),
        WebhookOutcome::Cancelled
    );

    let outcome = service.handle_notification(&settlement("ORDER-1")).await.unwrap();
    assert_eq!(outcome, WebhookOutcome::AlreadyFinal);
    assert_eq!(repo.order_status("ORDER-1"), OrderStatus::Cancelled);
    assert_eq!(repo.ticket_count(tenant_id), 0);
    assert_eq!(repo.points_of(customer_id), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_finalizations_produce_gapless_labels() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    const K: usize = 8;
    for i in 0..K {
        repo.seed_order(pending_order(&format!("ORDER-{}", i), tenant_id, customer_id, &[1]));
    }

    let service = Arc::new(PaymentWebhookService::new(repo.clone()));
    let mut handles = Vec::new();
    for i in 0..K {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .handle_notification(&settlement(&format!("ORDER-{}", i)))
                .await
                .unwrap()
        }));
    }

    let mut labels = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            WebhookOutcome::Paid(receipt) => labels.push(receipt.ticket_number),
            other => panic!("expected Paid, got {:?}", other),
        }
    }

    labels.sort_by_key(|label| {
        label
            .trim_start_matches("A-")
            .parse::<i64>()
            .expect("numeric label suffix")
    });
    let expected: Vec<String> = (1..=K as i64).map(|n| format!("A-{}", n)).collect();
    assert_eq!(labels, expected);
    assert_eq!(repo.ticket_count(tenant_id), K);

    // The stored tickets agree with the receipts: no duplicates.
    let stored: std::collections::HashSet<String> = {
        let state = repo.state.lock().unwrap();
        state.tickets.iter().map(|t| t.number.clone()).collect()
    };
    assert_eq!(stored.len(), K);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_deliveries_finalize_once() {
    let repo = Arc::new(InMemoryPaymentRepository::default());
    let tenant_id = Uuid::new_v4();
    let customer_id = Uuid::new_v4();
    repo.seed_order(pending_order("ORDER-1", tenant_id, customer_id, &[2]));

    let service = Arc::new(PaymentWebhookService::new(repo.clone()));
    let mut handles = Vec::new();
    for _ in 0..6 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.handle_notification(&settlement("ORDER-1")).await.unwrap()
        }));
    }

    let mut paid = 0;
    for handle in handles {
        if let WebhookOutcome::Paid(_) = handle.await.unwrap() {
            paid += 1;
        }
    }
    assert_eq!(paid, 1);
    assert_eq!(repo.ticket_count(tenant_id), 1);
    assert_eq!(repo.points_of(customer_id), 4);
}
