// ============================================================================
// Foodcourt Infrastructure - PostgreSQL Tenant Repository
// File: crates/foodcourt-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use foodcourt_core::domain::{CrowdStatus, Tenant};
use foodcourt_core::error::DomainError;
use foodcourt_core::repositories::TenantRepository;

use super::map_db_err;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub is_trending: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            status: CrowdStatus::from_str(&row.status).unwrap_or_default(),
            is_trending: row.is_trending,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            "SELECT id, name, status, is_trending, created_at FROM tenants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(|r| r.into()))
    }
}
