use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Acquire timeout for pooled connections. Store calls rely on this rather
/// than imposing their own deadlines.
const ACQUIRE_TIMEOUT_SECONDS: u64 = 5;

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECONDS))
        .connect(database_url)
        .await?;
    tracing::info!(max_connections, "database pool ready");
    Ok(pool)
}
