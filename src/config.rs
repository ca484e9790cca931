use std::env;

use anyhow::{Context, Result};
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;

const DEFAULT_POOL_SIZE: usize = 16;

/// Builds the Postgres pool from PG_* env vars. PG_PASS is optional for
/// local trust-auth setups.
pub fn pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);

    let max_size = match env::var("PG_POOL_SIZE") {
        Ok(raw) => raw.parse().context("PG_POOL_SIZE is not a number")?,
        Err(_) => DEFAULT_POOL_SIZE,
    };
    let mut pool_cfg = cfg.pool.take().unwrap_or_else(PoolConfig::default);
    pool_cfg.max_size = max_size;
    cfg.pool = Some(pool_cfg);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}
