use std::str::FromStr;

use sqlx::postgres::PgPool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::errors::StorageError;

/// Database handle shared by the user and linked-identity stores.
///
/// Constructed once from a connection URL and passed into each store; the
/// pools are reference-counted so cloning is cheap.
#[derive(Clone, Debug)]
pub enum DataStore {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl DataStore {
    /// Connect to the database named by `url`.
    ///
    /// Supported schemes are `sqlite:` and `postgres:`/`postgresql:`.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        if url.starts_with("sqlite:") {
            let opts = SqliteConnectOptions::from_str(url)
                .map_err(|e| StorageError::Connect(e.to_string()))?
                .create_if_missing(true);

            // An in-memory SQLite database exists per connection; a pool with
            // more than one connection would hand out a different (empty)
            // database on each checkout.
            let pool = if url.contains(":memory:") || url.contains("mode=memory") {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(opts)
                    .await
            } else {
                SqlitePool::connect_with(opts).await
            }
            .map_err(|e| StorageError::Connect(e.to_string()))?;

            tracing::info!("Connected to SQLite data store");
            Ok(Self::Sqlite(pool))
        } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
            let pool = PgPool::connect(url)
                .await
                .map_err(|e| StorageError::Connect(e.to_string()))?;

            tracing::info!("Connected to PostgreSQL data store");
            Ok(Self::Postgres(pool))
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            Err(StorageError::UnsupportedScheme(scheme.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let store = DataStore::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect");
        assert!(matches!(store, DataStore::Sqlite(_)));
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = DataStore::connect("mysql://localhost/users").await;
        match result {
            Err(StorageError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "mysql"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_memory_store_survives_across_acquires() {
        // The single-connection pool must keep handing back the same database.
        let store = DataStore::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect");
        let DataStore::Sqlite(pool) = &store else {
            panic!("expected sqlite store");
        };

        sqlx::query("CREATE TABLE probe (id INTEGER PRIMARY KEY)")
            .execute(pool)
            .await
            .expect("create table");
        sqlx::query("INSERT INTO probe (id) VALUES (1)")
            .execute(pool)
            .await
            .expect("insert");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM probe")
            .fetch_one(pool)
            .await
            .expect("count");
        assert_eq!(count, 1);
    }
}
