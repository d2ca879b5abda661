// ============================================================================
// Foodcourt Core - Order Service
// File: crates/foodcourt-core/src/services/order_service.rs
// ============================================================================
//! Checkout order creation with lazy guest-customer resolution.
//!
//! The gateway payment session itself is created by an external
//! collaborator; this service only owns the PENDING order record the
//! webhook will later finalize.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use foodcourt_shared::utils::mask_email;

use crate::domain::{Customer, Order, OrderItem};
use crate::error::DomainError;
use crate::repositories::{CustomerRepository, OrderRepository, TenantRepository};

/// Checkout input collected by the ordering UI.
#[derive(Debug, Clone)]
pub struct CheckoutCommand {
    pub email: String,
    pub phone: Option<String>,
    pub total_amount: i64,
    pub tenant_id: Uuid,
    pub items: Vec<OrderItem>,
}

pub struct OrderService<O: OrderRepository, C: CustomerRepository, N: TenantRepository> {
    orders: Arc<O>,
    customers: Arc<C>,
    tenants: Arc<N>,
}

impl<O: OrderRepository, C: CustomerRepository, N: TenantRepository> OrderService<O, C, N> {
    pub fn new(orders: Arc<O>, customers: Arc<C>, tenants: Arc<N>) -> Self {
        Self { orders, customers, tenants }
    }

    /// Create the PENDING order for a checkout. The returned order id
    /// is the gateway transaction reference the webhook will carry.
    pub async fn checkout(&self, command: CheckoutCommand) -> Result<Order, DomainError> {
        info!(
            "Checkout for {} at tenant {}",
            mask_email(&command.email),
            command.tenant_id
        );

        if self.tenants.find_by_id(&command.tenant_id).await?.is_none() {
            return Err(DomainError::TenantNotFound);
        }

        // Guest checkout: resolve or lazily create the customer.
        let customer = match self.customers.find_by_email(&command.email).await? {
            Some(existing) => existing,
            None => {
                let fresh = Customer::new(command.email.clone(), command.phone.clone())
                    .map_err(|e| DomainError::ValidationError(e.to_string()))?;
                self.customers.create(&fresh).await?
            }
        };

        let order = Order::new(
            command.total_amount,
            command.items,
            command.tenant_id,
            Some(customer.id),
            Utc::now(),
        )
        .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let created = self.orders.create(&order).await?;
        info!("Order {} created (PENDING)", created.id);
        Ok(created)
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Order, DomainError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CrowdStatus, Tenant};
    use crate::repositories::customer_repository::MockCustomerRepository;
    use crate::repositories::order_repository::MockOrderRepository;
    use crate::repositories::tenant_repository::MockTenantRepository;

    fn command(tenant_id: Uuid) -> CheckoutCommand {
        CheckoutCommand {
            email: "budi@example.com".into(),
            phone: Some("08123456789".into()),
            total_amount: 35000,
            tenant_id,
            items: vec![
                OrderItem { name: "Seblak".into(), price: 25000, qty: 1 },
                OrderItem { name: "Es Teh".into(), price: 10000, qty: 1 },
            ],
        }
    }

    fn known_tenants() -> MockTenantRepository {
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(|id| {
            Ok(Some(Tenant {
                id: *id,
                name: "Seblak Jeletot".into(),
                status: CrowdStatus::Quiet,
                is_trending: false,
                created_at: Utc::now(),
            }))
        });
        tenants
    }

    #[tokio::test]
    async fn test_checkout_creates_guest_customer() {
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_by_email().returning(|_| Ok(None));
        customers
            .expect_create()
            .times(1)
            .returning(|c| Ok(c.clone()));
        let mut orders = MockOrderRepository::new();
        orders.expect_create().returning(|o| Ok(o.clone()));

        let service =
            OrderService::new(Arc::new(orders), Arc::new(customers), Arc::new(known_tenants()));
        let order = service.checkout(command(Uuid::new_v4())).await.unwrap();
        assert!(order.id.starts_with("ORDER-"));
        assert!(order.customer_id.is_some());
    }

    #[tokio::test]
    async fn test_checkout_reuses_existing_customer() {
        let existing = Customer::new("budi@example.com".into(), None).unwrap();
        let existing_id = existing.id;

        let mut customers = MockCustomerRepository::new();
        customers
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        customers.expect_create().never();
        let mut orders = MockOrderRepository::new();
        orders.expect_create().returning(|o| Ok(o.clone()));

        let service =
            OrderService::new(Arc::new(orders), Arc::new(customers), Arc::new(known_tenants()));
        let order = service.checkout(command(Uuid::new_v4())).await.unwrap();
        assert_eq!(order.customer_id, Some(existing_id));
    }

    #[tokio::test]
    async fn test_checkout_unknown_tenant() {
        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_by_id().returning(|_| Ok(None));
        let customers = MockCustomerRepository::new();
        let orders = MockOrderRepository::new();

        let service = OrderService::new(Arc::new(orders), Arc::new(customers), Arc::new(tenants));
        let err = service.checkout(command(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, DomainError::TenantNotFound));
    }

    #[tokio::test]
    async fn test_get_order_not_found() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|_| Ok(None));

        let service = OrderService::new(
            Arc::new(orders),
            Arc::new(MockCustomerRepository::new()),
            Arc::new(MockTenantRepository::new()),
        );
        let err = service.get_order("ORDER-404").await.unwrap_err();
        assert!(matches!(err, DomainError::OrderNotFound(_)));
    }
}
