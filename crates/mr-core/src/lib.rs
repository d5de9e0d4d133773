//! mr-core - Core library for Migrun
//!
//! This crate provides configuration parsing, error types, and the
//! migration file loader shared by the other Migrun crates.

pub mod config;
pub mod error;
pub mod migration;

pub use config::{Config, DatabaseConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{MigrationScript, PreviewLine};
