//! Customer repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::Customer;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError>;
}
