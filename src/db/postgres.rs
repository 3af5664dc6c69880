use crate::error::ScrapeError;
use crate::service::exporter::RecordSink;
use crate::types::CheckinRecord;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;

pub type PgPool = Pool<Postgres>;

/// Statement invoking the external upsert procedure; arguments are positional.
pub const MERGE_BEER_LOG: &str = "CALL merge_beer_log($1, $2, $3, $4, $5, $6)";

/// Postgres-backed beer log. Deduplication is owned by `merge_beer_log`.
#[derive(Clone)]
pub struct BeerLogStorage {
    pool: PgPool,
}

impl BeerLogStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool sized for `max_connections` concurrent merges.
    pub async fn connect(database_url: &str, max_connections: usize) -> Result<Self, ScrapeError> {
        let max_connections = u32::try_from(max_connections.max(1)).unwrap_or(u32::MAX);
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!(max_connections, "database pool ready");
        Ok(Self::new(pool))
    }

    pub async fn merge(&self, record: &CheckinRecord) -> Result<(), ScrapeError> {
        sqlx::query(MERGE_BEER_LOG)
            .bind(&record.name)
            .bind(&record.brewery)
            .bind(&record.rating)
            .bind(&record.style)
            .bind(&record.abv)
            .bind(&record.total_checkins)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl RecordSink for BeerLogStorage {
    async fn merge(&self, record: &CheckinRecord) -> Result<(), ScrapeError> {
        BeerLogStorage::merge(self, record).await
    }
}
