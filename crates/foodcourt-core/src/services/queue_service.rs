// ============================================================================
// Foodcourt Core - Queue Service
// File: crates/foodcourt-core/src/services/queue_service.rs
// ============================================================================
//! Queue operations: walk-in joins, staff calls, and display reads.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use foodcourt_shared::constants::{BUSY_WAITING_THRESHOLD, ESTIMATED_MINUTES_PER_TICKET};

use crate::domain::{Ticket, TicketStatus};
use crate::error::DomainError;
use crate::repositories::{QueueEntry, TenantRepository, TicketRepository};

/// Public queue view for one tenant.
#[derive(Debug, Clone)]
pub struct QueueStatusView {
    pub tenant_id: Uuid,
    pub waiting_count: i64,
    /// Label currently being served, "-" when nobody is called.
    pub current_number: String,
    pub estimated_wait_minutes: i64,
    pub is_crowded: bool,
}

pub struct QueueService<T: TicketRepository, N: TenantRepository> {
    tickets: Arc<T>,
    tenants: Arc<N>,
}

impl<T: TicketRepository, N: TenantRepository> QueueService<T, N> {
    pub fn new(tickets: Arc<T>, tenants: Arc<N>) -> Self {
        Self { tickets, tenants }
    }

    /// Walk-in join: issue the next ticket of the day without an
    /// order reference. Paid orders get their ticket through the
    /// webhook path instead.
    pub async fn join_queue(
        &self,
        tenant_id: &Uuid,
        order_id: Option<&str>,
    ) -> Result<Ticket, DomainError> {
        if self.tenants.find_by_id(tenant_id).await?.is_none() {
            return Err(DomainError::TenantNotFound);
        }

        let ticket = self.tickets.issue(tenant_id, order_id, Utc::now()).await?;
        info!("Ticket {} issued for tenant {}", ticket.number, tenant_id);
        Ok(ticket)
    }

    /// Staff action on a ticket. The repository refreshes the crowd
    /// status in the same transaction as the status write.
    pub async fn update_status(
        &self,
        ticket_id: &Uuid,
        status: TicketStatus,
    ) -> Result<Ticket, DomainError> {
        let ticket = self.tickets.set_status(ticket_id, status).await?;
        info!(
            "Ticket {} ({}) -> {}",
            ticket.number,
            ticket.tenant_id,
            status.as_str()
        );
        Ok(ticket)
    }

    /// Public queue info for the customer-facing tenant card.
    pub async fn queue_info(&self, tenant_id: &Uuid) -> Result<QueueStatusView, DomainError> {
        let info = self.tickets.queue_info(tenant_id).await?;
        Ok(QueueStatusView {
            tenant_id: *tenant_id,
            waiting_count: info.waiting_count,
            current_number: info.current_number.unwrap_or_else(|| "-".to_string()),
            estimated_wait_minutes: info.waiting_count * ESTIMATED_MINUTES_PER_TICKET,
            is_crowded: info.waiting_count > BUSY_WAITING_THRESHOLD,
        })
    }

    /// Tenant staff dashboard: active tickets with order details.
    pub async fn dashboard(&self, tenant_id: &Uuid) -> Result<Vec<QueueEntry>, DomainError> {
        if self.tenants.find_by_id(tenant_id).await?.is_none() {
            return Err(DomainError::TenantNotFound);
        }
        self.tickets.active_for_tenant(tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CrowdStatus, Tenant};
    use crate::repositories::tenant_repository::MockTenantRepository;
    use crate::repositories::ticket_repository::{MockTicketRepository, QueueInfo};

    fn tenant(id: Uuid) -> Tenant {
        Tenant {
            id,
            name: "Es Cendol Elizabeth".into(),
            status: CrowdStatus::Quiet,
            is_trending: false,
            created_at: Utc::now(),
        }
    }

    fn ticket(tenant_id: Uuid, number: &str) -> Ticket {
        Ticket {
            id: Uuid::new_v4(),
            number: number.into(),
            tenant_id,
            order_id: None,
            status: TicketStatus::Waiting,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_join_queue_unknown_tenant() {
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(|_| Ok(None));
        let mut tickets = MockTicketRepository::new();
        tickets.expect_issue().never();

        let service = QueueService::new(Arc::new(tickets), Arc::new(tenants));
        let err = service.join_queue(&Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, DomainError::TenantNotFound));
    }

    #[tokio::test]
    async fn test_join_queue_issues_ticket() {
        let tenant_id = Uuid::new_v4();
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_find_by_id()
            .returning(move |id| Ok(Some(tenant(*id))));
        let mut tickets = MockTicketRepository::new();
        tickets
            .expect_issue()
            .times(1)
            .returning(|tenant_id, _, _| Ok(ticket(*tenant_id, "A-1")));

        let service = QueueService::new(Arc::new(tickets), Arc::new(tenants));
        let issued = service.join_queue(&tenant_id, None).await.unwrap();
        assert_eq!(issued.number, "A-1");
        assert_eq!(issued.status, TicketStatus::Waiting);
    }

    #[tokio::test]
    async fn test_queue_info_view() {
        let tenant_id = Uuid::new_v4();
        let mut tickets = MockTicketRepository::new();
        tickets.expect_queue_info().returning(|_| {
            Ok(QueueInfo { waiting_count: 6, current_number: Some("A-4".into()) })
        });
        let tenants = MockTenantRepository::new();

        let service = QueueService::new(Arc::new(tickets), Arc::new(tenants));
        let view = service.queue_info(&tenant_id).await.unwrap();
        assert_eq!(view.waiting_count, 6);
        assert_eq!(view.current_number, "A-4");
        assert_eq!(view.estimated_wait_minutes, 18);
        assert!(view.is_crowded);
    }

    #[tokio::test]
    async fn test_queue_info_nobody_called() {
        let mut tickets = MockTicketRepository::new();
        tickets
            .expect_queue_info()
            .returning(|_| Ok(QueueInfo { waiting_count: 1, current_number: None }));
        let tenants = MockTenantRepository::new();

        let service = QueueService::new(Arc::new(tickets), Arc::new(tenants));
        let view = service.queue_info(&Uuid::new_v4()).await.unwrap();
        assert_eq!(view.current_number, "-");
        assert!(!view.is_crowded);
    }
}
