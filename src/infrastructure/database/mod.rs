//! Database pools for database entries (sqlx, Postgres)

pub mod connection;

pub use connection::{ConnectMode, ConnectionTarget, PostgresInitializer};
