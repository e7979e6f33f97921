use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::ops::Deref;
use std::path::Path;
use std::time::{Duration, Instant};

use super::schema::SCHEMA;
use crate::config::DatabaseSettings;
use crate::error::StoreResult;

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

/// SQLite VM steps between deadline checks
const PROGRESS_CHECK_OPS: i32 = 1_000;

/// SQL name of the Unicode-aware lowercase function
pub(crate) const FOLD_FUNCTION: &str = "unicode_lower";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling and per-call query deadlines
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
    query_timeout: Duration,
}

impl Database {
    /// Open a pool at `path` with default settings
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let settings = DatabaseSettings {
            path: path.as_ref().to_string_lossy().into_owned(),
            ..DatabaseSettings::default()
        };
        Self::open(&settings)
    }

    /// Open a pool sized and timed by `settings`
    pub fn open(settings: &DatabaseSettings) -> StoreResult<Self> {
        let query_timeout = settings.query_timeout();
        let manager = Self::create_connection_manager(&settings.path)
            .with_init(move |conn| {
                // Lock waits run outside the progress handler, so they add to the deadline
                conn.busy_timeout(query_timeout)?;
                register_functions(conn)
            });

        let mut builder = Pool::builder().connection_timeout(settings.acquire_timeout());

        // Every connection to ":memory:" is its own database, so the pool is
        // pinned to a single connection that is never reaped.
        builder = if is_memory_path(&settings.path) {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            let max_size = settings.max_open_conns.max(1);
            builder
                .max_size(max_size)
                .min_idle(Some(settings.max_idle_conns.min(max_size)))
                .idle_timeout(Some(settings.idle_timeout()))
        };

        let pool = builder.build(manager)?;
        tracing::debug!(
            path = %settings.path,
            max_size = pool.max_size(),
            query_timeout_ms = query_timeout.as_millis() as u64,
            "Opened database pool"
        );

        Ok(Self {
            pool,
            query_timeout,
        })
    }

    /// Create appropriate connection manager based on path
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    fn create_connection_manager(path: &str) -> SqliteConnectionManager {
        if is_memory_path(path) {
            SqliteConnectionManager::memory()
        } else {
            SqliteConnectionManager::file(path.trim())
        }
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> StoreResult<Self> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Replace the per-call deadline applied to connections handed out from now on
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Initialize the database schema. Safe to run repeatedly.
    pub fn initialize(&self) -> StoreResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("Database schema initialized");
        Ok(())
    }

    /// Get a connection from the pool, armed with the query deadline
    pub fn connection(&self) -> StoreResult<TimedConnection> {
        let conn = self.pool.get()?;
        Ok(TimedConnection::new(conn, self.query_timeout))
    }
}

/// Built-in `lower()` and `LIKE` only fold ASCII, so searches compare
/// through this instead.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

fn is_memory_path(path: &str) -> bool {
    path.trim().eq_ignore_ascii_case(MEMORY_DB_PATH)
}

/// A pooled connection whose statements are interrupted once its deadline
/// passes. The deadline is cleared when the connection goes back to the pool.
pub struct TimedConnection {
    conn: DbConnection,
}

impl TimedConnection {
    fn new(conn: DbConnection, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        conn.progress_handler(
            PROGRESS_CHECK_OPS,
            Some(move || Instant::now() >= deadline),
        );
        Self { conn }
    }
}

impl Deref for TimedConnection {
    type Target = rusqlite::Connection;

    fn deref(&self) -> &rusqlite::Connection {
        &self.conn
    }
}

impl Drop for TimedConnection {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    const SLOW_QUERY: &str = "WITH RECURSIVE n(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM n WHERE x < 500000000)
         SELECT COUNT(*) FROM n";

    #[test]
    fn test_database_creation() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");

        // Verify tables exist
        let conn = db.connection().expect("Failed to get connection");
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .expect("Failed to prepare statement");

        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .expect("Failed to query tables")
            .collect::<Result<Vec<_>, _>>()
            .expect("Failed to collect tables");

        for table in ["users", "posts", "comments", "followers"] {
            assert!(tables.contains(&table.to_string()), "missing table {}", table);
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("First initialize failed");
        db.initialize().expect("Second initialize failed");
    }

    #[test]
    fn test_memory_database_detection() {
        let memory_paths = [":memory:", " :memory: ", ":MEMORY:", " :Memory: "];

        for path in &memory_paths {
            let db = Database::new(path).expect("Failed to create memory database");
            db.initialize().expect("Failed to initialize schema");
            assert_eq!(db.pool.max_size(), 1);
        }

        let temp_path = std::env::temp_dir().join(format!("social_store_{}.db", std::process::id()));
        let db = Database::new(&temp_path).expect("Failed to create file database");
        db.initialize().expect("Failed to initialize file schema");
        assert_eq!(db.pool.max_size(), 3);

        drop(db);
        let _ = std::fs::remove_file(temp_path);
    }

    #[test]
    fn test_slow_query_is_interrupted() {
        let db = Database::in_memory()
            .expect("Failed to create database")
            .with_query_timeout(Duration::from_millis(20));

        let conn = db.connection().expect("Failed to get connection");
        let result: Result<i64, rusqlite::Error> = conn.query_row(SLOW_QUERY, [], |row| row.get(0));
        let err = StoreError::from(result.expect_err("query should have been interrupted"));
        assert!(matches!(err, StoreError::Timeout), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_file_pool_settings_applied() {
        let temp_path = std::env::temp_dir().join(format!("social_store_pool_{}.db", std::process::id()));
        let settings = DatabaseSettings {
            path: temp_path.to_string_lossy().into_owned(),
            max_open_conns: 3,
            max_idle_conns: 2,
            query_timeout_ms: 750,
            ..DatabaseSettings::default()
        };
        let db = Database::open(&settings).expect("Failed to open database");

        // build() blocks until the idle floor is reached
        assert_eq!(db.pool.state().connections, 2);

        let conn = db.connection().expect("Failed to get connection");
        let busy_ms: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .expect("Failed to read busy_timeout");
        assert_eq!(busy_ms, 750);

        drop(conn);
        drop(db);
        let _ = std::fs::remove_file(temp_path);
    }

    #[test]
    fn test_deadline_resets_per_checkout() {
        let db = Database::in_memory()
            .expect("Failed to create database")
            .with_query_timeout(Duration::from_millis(50));

        let first = db.connection().expect("Failed to get connection");
        drop(first);
        std::thread::sleep(Duration::from_millis(80));

        // A fresh checkout gets a fresh deadline
        let conn = db.connection().expect("Failed to get connection");
        let one: i64 = conn
            .query_row("SELECT 1", [], |row| row.get(0))
            .expect("Quick query should succeed");
        assert_eq!(one, 1);
    }
}
