// ============================================================================
// Foodcourt Infrastructure - PostgreSQL Customer Repository
// File: crates/foodcourt-infrastructure/src/database/postgres/customer_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use foodcourt_core::domain::Customer;
use foodcourt_core::error::DomainError;
use foodcourt_core::repositories::CustomerRepository;

use super::map_db_err;

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            email: row.email,
            phone: row.phone,
            points: row.points,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, email, phone, points, created_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            "SELECT id, email, phone, points, created_at FROM customers WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError> {
        info!("Creating customer {}", customer.id);

        let result: Result<CustomerRow, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO customers (id, email, phone, points, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, phone, points, created_at
            "#,
        )
        .bind(customer.id)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.points)
        .bind(customer.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                // Two concurrent first checkouts for the same email:
                // the other insert won, reuse it.
                warn!("Customer email already exists, reusing existing record");
                self.find_by_email(&customer.email)
                    .await?
                    .ok_or(DomainError::CustomerNotFound)
            }
            Err(e) => Err(map_db_err(e)),
        }
    }
}
