//! Order repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::Order;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &Order) -> Result<Order, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError>;
}
