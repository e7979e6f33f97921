pub mod schema;
pub mod connection;
pub mod conditions;
pub mod repositories;

pub use connection::{Database, DbConnection, DbPool, TimedConnection};
