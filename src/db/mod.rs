use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Every connection to `sqlite::memory:` opens its own database, so the
    // single connection must never be closed and replaced.
    let in_memory = database_url.contains(":memory:");
    let max_connections = if in_memory { 1 } else { max_connections.max(1) };

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3));

    if in_memory {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options.connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}

const SAMPLE_CASH_CARDS: &[(i64, f64, &str)] = &[
    (99, 123.45, "Thai"),
    (100, 1.00, "Thai"),
    (101, 150.00, "Thai"),
    (102, 111.45, "Thai"),
    (103, 11.58, "Mike"),
];

/// Inserts the sample cash cards. Existing ids are left untouched, so this is
/// safe to run on every startup.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for &(id, amount, owner) in SAMPLE_CASH_CARDS {
        let result = sqlx::query("INSERT OR IGNORE INTO cash_card (id, amount, owner) VALUES (?, ?, ?)")
            .bind(id)
            .bind(amount)
            .bind(owner)
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;

    Ok(inserted)
}
