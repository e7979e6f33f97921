// Persistence layer for the social app: connection pool, schema and one
// repository per table, bundled together in `Storage`.

pub mod config;
pub mod db;
pub mod error;
pub mod password;
pub mod storage;

pub use config::{DatabaseSettings, Settings};
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use storage::Storage;
