//! mr-sql - SQL layer for Migrun
//!
//! Splits migration scripts into statements on `;` and flags statements the
//! naive split has probably cut in the middle of a literal or body.

pub mod hazard;
pub mod splitter;

pub use hazard::{HazardScanner, SplitHazard};
pub use splitter::{split_statements, Statements, COMMENT_PREFIX, STATEMENT_DELIMITER};
