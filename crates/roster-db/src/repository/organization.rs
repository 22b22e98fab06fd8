//! # Organization Repository
//!
//! Tenant root rows. Organizations are not tenant-scoped themselves, so
//! they do not go through the generic repository.

use chrono::Utc;
use roster_core::Organization;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// Repository for organization operations.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: SqlitePool,
}

impl OrganizationRepository {
    /// Creates a new OrganizationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrganizationRepository { pool }
    }

    /// Creates an organization with a fresh Uid.
    pub async fn create(&self, name: &str) -> DbResult<Organization> {
        let org = Organization {
            uid: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            is_active: true,
            created_on: Utc::now(),
        };
        self.insert(&org).await?;
        Ok(org)
    }

    /// Inserts an organization with a caller-chosen Uid.
    ///
    /// ## Errors
    /// * `DbError::DuplicateEntry` - Uid already taken
    pub async fn insert(&self, org: &Organization) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO Organizations (Uid, Name, IsActive, CreatedOn)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&org.uid)
        .bind(&org.name)
        .bind(org.is_active)
        .bind(org.created_on)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::classify(e, "INSERT"))?;

        info!(org_id = %org.uid, name = %org.name, "Organization created");
        Ok(())
    }

    pub async fn find_by_id(&self, uid: &str) -> DbResult<Option<Organization>> {
        debug!(org_id = %uid, "Loading organization");

        let org = sqlx::query_as::<_, Organization>(
            "SELECT Uid, Name, IsActive, CreatedOn FROM Organizations WHERE Uid = ?1",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(org)
    }

    /// Active organizations, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Organization>> {
        let orgs = sqlx::query_as::<_, Organization>(
            r#"
            SELECT Uid, Name, IsActive, CreatedOn
            FROM Organizations
            WHERE IsActive = 1
            ORDER BY CreatedOn ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orgs)
    }

    /// True if the organization exists and is active.
    pub async fn is_active(&self, uid: &str) -> DbResult<bool> {
        let active: Option<bool> =
            sqlx::query_scalar("SELECT IsActive FROM Organizations WHERE Uid = ?1")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(active.unwrap_or(false))
    }

    /// Deactivates an organization. Its rows stay in place.
    pub async fn deactivate(&self, uid: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE Organizations SET IsActive = 0 WHERE Uid = ?1")
            .bind(uid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Organization", uid));
        }

        info!(org_id = %uid, "Organization deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_and_deactivate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orgs = db.organizations();

        let org = orgs.create("  Acme  ").await.unwrap();
        assert_eq!(org.name, "Acme");
        assert!(orgs.is_active(&org.uid).await.unwrap());

        let loaded = orgs.find_by_id(&org.uid).await.unwrap().unwrap();
        assert_eq!(loaded.uid, org.uid);

        orgs.deactivate(&org.uid).await.unwrap();
        assert!(!orgs.is_active(&org.uid).await.unwrap());
        assert!(orgs.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_uid() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orgs = db.organizations();
        let org = orgs.create("Acme").await.unwrap();

        let err = orgs.insert(&org).await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateEntry { .. }));
        assert!(!orgs.is_active("missing").await.unwrap());
    }
}
