use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::PipelineConfig;
use crate::error::Result;

pub async fn create_pool(config: &PipelineConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    Ok(pool)
}

/// Apply the embedded `camt53`/`camt_raw` migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Open a pool and bring the schema up to date. Any failure here is fatal
/// for the worker.
pub async fn connect(config: &PipelineConfig) -> Result<PgPool> {
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    tracing::debug!(max_connections = config.max_connections, "database ready");
    Ok(pool)
}
