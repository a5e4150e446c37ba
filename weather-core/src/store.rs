//! Append-only reading storage.
//!
//! `SqliteStore` keeps every reading in a single `reading` table and answers
//! "latest reading for a city" with an ordered lookup on `(name, timestamp)`.

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use std::{fmt::Debug, path::Path, sync::Arc, time::Duration};

use crate::{
    error::StoreError,
    model::{Reading, ReadingDto},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait ReadingSaver: Send + Sync + Debug {
    /// Persist one reading. Zero affected rows is an error.
    async fn insert(&self, reading: &Reading) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ReadingProvider: Send + Sync + Debug {
    /// The reading with the greatest `observed_at` for `city`.
    async fn latest_for(&self, city: &str) -> Result<ReadingDto, StoreError>;
}

/// SQLite-backed reading store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    timeout: Duration,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, timeout)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, DEFAULT_TIMEOUT)
    }

    fn from_connection(conn: Connection, timeout: Duration) -> Result<Self, StoreError> {
        conn.busy_timeout(timeout)?;
        init_schema(&conn)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)), timeout })
    }

    /// Run `f` against the connection on the blocking pool, bounded by the store timeout.
    async fn with_conn<T, F>(&self, op: &'static str, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let task = tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            f(&*guard)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(StoreError::persistence(format!("{op} failed: {join_err}"))),
            Err(_) => Err(StoreError::persistence(format!(
                "{op} timed out after {}s",
                self.timeout.as_secs_f64()
            ))),
        }
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reading (
            name TEXT NOT NULL,
            temperature REAL NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reading_name_timestamp ON reading(name, timestamp DESC);
        "#,
    )?;
    Ok(())
}

#[async_trait]
impl ReadingSaver for SqliteStore {
    async fn insert(&self, reading: &Reading) -> Result<(), StoreError> {
        let reading = reading.clone();

        self.with_conn("insert", move |conn| {
            let affected = conn.execute(
                "INSERT INTO reading (name, temperature, timestamp) VALUES (?1, ?2, ?3)",
                params![reading.city, reading.temperature, reading.observed_at],
            )?;

            if affected == 0 {
                return Err(StoreError::WriteNotConfirmed { city: reading.city });
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ReadingProvider for SqliteStore {
    async fn latest_for(&self, city: &str) -> Result<ReadingDto, StoreError> {
        let city = city.to_string();

        self.with_conn("latest_for", move |conn| {
            let row = conn
                .query_row(
                    "SELECT name, timestamp, temperature
                     FROM reading
                     WHERE name = ?1
                     ORDER BY timestamp DESC
                     LIMIT 1",
                    params![city],
                    |row| {
                        Ok(ReadingDto {
                            city: row.get(0)?,
                            observed_at: row.get(1)?,
                            temperature: row.get(2)?,
                        })
                    },
                )
                .optional()?;

            row.ok_or(StoreError::NotFound(city))
        })
        .await
    }
}
