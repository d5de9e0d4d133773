//! Split-hazard detection
//!
//! The splitter cuts on every `;`, so a statement containing a semicolon
//! inside a literal or body comes out as fragments with an unterminated
//! quote. Tokenizing each fragment with sqlparser exposes those fragments.
//! Detection only warns; the fragments are still executed as split.

use sqlparser::dialect::{Dialect, DuckDbDialect, PostgreSqlDialect};
use sqlparser::tokenizer::Tokenizer;

/// A statement that failed to tokenize on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitHazard {
    /// Tokenizer error message, including its location
    pub message: String,
}

impl std::fmt::Display for SplitHazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "statement may have been split inside a literal or body: {}",
            self.message
        )
    }
}

/// Tokenizes statements to find fragments left by the naive split
pub struct HazardScanner {
    dialect: Box<dyn Dialect>,
    name: &'static str,
}

impl HazardScanner {
    /// Scanner using PostgreSQL quoting rules (including `$$` bodies)
    pub fn postgres() -> Self {
        Self {
            dialect: Box::new(PostgreSqlDialect {}),
            name: "postgres",
        }
    }

    /// Scanner using DuckDB quoting rules
    pub fn duckdb() -> Self {
        Self {
            dialect: Box::new(DuckDbDialect {}),
            name: "duckdb",
        }
    }

    /// Pick a scanner for a database backend name, defaulting to PostgreSQL
    pub fn for_backend(db_type: &str) -> Self {
        match db_type.to_lowercase().as_str() {
            "duckdb" => Self::duckdb(),
            _ => Self::postgres(),
        }
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.name
    }

    /// Check a single statement, returning a hazard if it does not tokenize
    pub fn scan(&self, statement: &str) -> Option<SplitHazard> {
        match Tokenizer::new(self.dialect.as_ref(), statement).tokenize() {
            Ok(_) => None,
            Err(e) => {
                log::debug!("Tokenizer rejected statement fragment: {}", e);
                Some(SplitHazard {
                    message: e.to_string(),
                })
            }
        }
    }
}

impl Default for HazardScanner {
    fn default() -> Self {
        Self::postgres()
    }
}

#[cfg(test)]
#[path = "hazard_test.rs"]
mod tests;
