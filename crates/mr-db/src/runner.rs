//! Sequential statement execution

use crate::traits::Database;
use std::time::{Duration, Instant};

/// Maximum characters of a failure message kept in an outcome
pub const ERROR_MESSAGE_LIMIT: usize = 100;

/// What happened to one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementStatus {
    /// Executed and committed
    Success { rows_affected: usize },
    /// Rejected by the database; message truncated to [`ERROR_MESSAGE_LIMIT`]
    Failed { message: String },
    /// Skipped because the connection was lost earlier in the run
    NotAttempted,
}

/// Result of a single statement execution
#[derive(Debug, Clone)]
pub struct StatementOutcome {
    /// Position in the script, 1-based
    pub index: usize,

    /// Number of statements in the script
    pub total: usize,

    /// Statement text as executed
    pub statement: String,

    pub status: StatementStatus,

    /// Execution time (zero for statements not attempted)
    pub duration: Duration,
}

impl StatementOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, StatementStatus::Success { .. })
    }
}

/// Summary of a sequential run
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// One outcome per input statement, in input order
    pub outcomes: Vec<StatementOutcome>,

    /// Reason the run stopped early, if the connection was lost
    pub aborted: Option<String>,

    /// Total execution time
    pub duration: Duration,
}

impl ExecutionReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, StatementStatus::Failed { .. }))
            .count()
    }

    pub fn not_attempted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == StatementStatus::NotAttempted)
            .count()
    }

    /// Check if every statement succeeded
    pub fn all_succeeded(&self) -> bool {
        self.aborted.is_none() && self.succeeded() == self.total()
    }
}

/// Truncate a message to at most `limit` characters, on a char boundary
pub fn truncate_message(message: &str, limit: usize) -> String {
    match message.char_indices().nth(limit) {
        Some((byte_idx, _)) => message[..byte_idx].to_string(),
        None => message.to_string(),
    }
}

/// Runs statements one at a time against a database
///
/// A failing statement does not stop the run and nothing is rolled back:
/// the database ends up with every statement that succeeded on its own.
/// Only a lost connection ends the run early.
pub struct StatementRunner<'a> {
    db: &'a dyn Database,
}

impl<'a> StatementRunner<'a> {
    /// Create a new statement runner
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Execute statements in order, reporting each outcome as it happens
    pub async fn run<S, F>(&self, statements: &[S], mut on_outcome: F) -> ExecutionReport
    where
        S: AsRef<str>,
        F: FnMut(&StatementOutcome),
    {
        let start = Instant::now();
        let total = statements.len();
        let mut report = ExecutionReport {
            outcomes: Vec::with_capacity(total),
            ..Default::default()
        };

        for (i, statement) in statements.iter().enumerate() {
            let index = i + 1;

            if report.aborted.is_some() {
                let outcome = StatementOutcome {
                    index,
                    total,
                    statement: statement.as_ref().to_string(),
                    status: StatementStatus::NotAttempted,
                    duration: Duration::ZERO,
                };
                on_outcome(&outcome);
                report.outcomes.push(outcome);
                continue;
            }

            let start_stmt = Instant::now();
            let sql = statement.as_ref();
            let status = match self.db.execute(sql).await {
                Ok(rows_affected) => StatementStatus::Success { rows_affected },
                Err(e) => {
                    if e.is_connection_lost() {
                        log::warn!(
                            "Connection lost at statement {}/{}, stopping: {}",
                            index,
                            total,
                            e
                        );
                        report.aborted = Some(e.detail());
                    } else {
                        log::debug!("Statement {}/{} failed: {}", index, total, e);
                    }
                    StatementStatus::Failed {
                        message: truncate_message(&e.detail(), ERROR_MESSAGE_LIMIT),
                    }
                }
            };

            let outcome = StatementOutcome {
                index,
                total,
                statement: sql.to_string(),
                status,
                duration: start_stmt.elapsed(),
            };
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        report.duration = start.elapsed();
        report
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
