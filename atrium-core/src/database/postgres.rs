use async_trait::async_trait;
use atrium_model::{CatalogEntry, EntryId, MediaRef, NewCatalogEntry};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, postgres::PgPoolOptions};
use tracing::info;
use uuid::Uuid;

use super::ports::CatalogRepository;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, FromRow)]
struct CatalogEntryRow {
    id: Uuid,
    media_ref: String,
    description: String,
    category: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CatalogEntryRow> for CatalogEntry {
    type Error = CatalogError;

    fn try_from(row: CatalogEntryRow) -> Result<Self, Self::Error> {
        let media_ref = MediaRef::new(row.media_ref).ok_or_else(|| {
            CatalogError::InvalidRecord(format!("entry {} has no media_ref", row.id))
        })?;
        Ok(CatalogEntry {
            id: EntryId(row.id),
            media_ref,
            description: row.description,
            category: row.category,
            created_at: row.created_at,
        })
    }
}

/// Catalog store backed by the `catalog_entries` table.
#[derive(Clone, Debug)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    /// Wrap an existing pool. The schema is not touched.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str) -> CatalogResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations.
    pub async fn initialize_schema(&self) -> CatalogResult<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| CatalogError::Storage(format!("migration failed: {e}")))?;
        info!("catalog schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn insert(&self, entry: NewCatalogEntry) -> CatalogResult<CatalogEntry> {
        let row = sqlx::query_as::<_, CatalogEntryRow>(
            r#"
            INSERT INTO catalog_entries (id, media_ref, description, category, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, media_ref, description, category, created_at
            "#,
        )
        .bind(EntryId::new().0)
        .bind(entry.media_ref.as_str())
        .bind(&entry.description)
        .bind(entry.category.as_deref())
        .bind(entry.created_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let rows = sqlx::query_as::<_, CatalogEntryRow>(
            r#"
            SELECT id, media_ref, description, category, created_at
            FROM catalog_entries
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CatalogEntry::try_from).collect()
    }

    async fn count(&self) -> CatalogResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}
