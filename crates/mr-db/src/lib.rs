//! mr-db - Database layer for Migrun
//!
//! This crate provides the `Database` trait, a PostgreSQL backend (behind
//! the default `postgres` feature), a DuckDB backend for local rehearsal,
//! connection-URL dispatch, and the sequential statement runner.

pub mod connect;
pub mod duckdb;
pub mod error;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod runner;
pub mod traits;

pub use connect::{connect, redact_url, ConnectionTarget};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;
pub use runner::{ExecutionReport, StatementOutcome, StatementRunner, StatementStatus};
pub use traits::Database;
