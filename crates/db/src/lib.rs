pub mod memory;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

/// SQLSTATE codes PostgreSQL uses when a transaction lost a race:
/// serialization_failure and deadlock_detected.
const CONCURRENCY_SQLSTATES: [&str; 2] = ["40001", "40P01"];

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// True when `report` was caused by a transaction losing a concurrent race
/// rather than by bad input or a broken database.
pub fn is_concurrency_conflict(report: &eyre::Report) -> bool {
    report
        .chain()
        .filter_map(|cause| cause.downcast_ref::<sqlx::Error>())
        .filter_map(|err| err.as_database_error())
        .filter_map(|db_err| db_err.code())
        .any(|code| CONCURRENCY_SQLSTATES.contains(&code.as_ref()))
}
