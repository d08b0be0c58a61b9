//! Connection pool ownership and the raw statement primitives the store builds on.

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{
        SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
    },
    Connection, Sqlite, SqlitePool, Transaction,
};
use task_core::error::{Result, TaskError};
use tracing::{debug, info};

use crate::common::sqlx_error_to_task_error;

/// A parameterized statement ready to run against the pool or a transaction
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// How long a connection waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings needed to open the connection pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// SQLite URL, e.g. `sqlite:///var/lib/tasks.sqlite` or `sqlite::memory:`
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub connection_timeout: Duration,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            connection_timeout: Duration::from_secs(30),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Owner of the SQLite connection pool.
///
/// Cloning is cheap and shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool and verify the database answers a ping
    ///
    /// # Returns
    /// * `Ok(Database)` - Pool is open and reachable
    /// * `Err(TaskError::Connection)` - If the URL is invalid, the pool cannot
    ///   be opened, or the liveness check fails
    pub async fn open(settings: &DatabaseSettings) -> Result<Self> {
        let in_memory = settings.is_in_memory();

        let connect_options = SqliteConnectOptions::from_str(&settings.url)
            .map_err(|e| {
                TaskError::Connection(format!("Invalid database URL '{}': {e}", settings.url))
            })?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT)
            .journal_mode(if in_memory {
                SqliteJournalMode::Memory
            } else {
                SqliteJournalMode::Wal
            });

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connection_timeout);

        if in_memory {
            // Each connection to :memory: is a separate database, so pin a single one
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| TaskError::Connection(format!("Failed to open database: {e}")))?;

        let database = Self { pool };
        database.ping().await?;

        info!(
            max_connections = settings.max_connections,
            in_memory, "Database connection pool opened"
        );
        Ok(database)
    }

    /// Liveness check on a pooled connection
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| TaskError::Connection(format!("Failed to acquire connection: {e}")))?;

        conn.ping()
            .await
            .map_err(|e| TaskError::Connection(format!("Database ping failed: {e}")))
    }

    /// Run a read statement directly on the pool, outside any transaction
    pub async fn query<'q>(&self, query: SqliteQuery<'q>) -> Result<Vec<SqliteRow>> {
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        debug!(row_count = rows.len(), "Query returned rows");
        Ok(rows)
    }

    /// Start a transaction.
    ///
    /// Dropping the handle without committing rolls the transaction back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| TaskError::Transaction(format!("Failed to start transaction: {e}")))
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TaskError::Database(format!("Migration failed: {e}")))?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    ///
    /// Calling this more than once is harmless.
    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
