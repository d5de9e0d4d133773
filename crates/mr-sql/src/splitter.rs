//! Naive statement splitting
//!
//! Splits on every `;` with no lexical awareness. A `;` inside a string
//! literal, a quoted identifier, a dollar-quoted function body or a block
//! comment ends the statement early. [`crate::hazard`] can flag statements
//! that were probably cut this way, but the split itself is never corrected.

use std::iter::FusedIterator;

/// Statement terminator
pub const STATEMENT_DELIMITER: char = ';';

/// Line comment marker
pub const COMMENT_PREFIX: &str = "--";

/// Lazy iterator over the statements of a SQL script
///
/// Created by [`split_statements`]. Yields borrowed slices of the input.
#[derive(Debug, Clone)]
pub struct Statements<'a> {
    segments: std::str::Split<'a, char>,
}

/// Split SQL text into trimmed statements.
///
/// Each `;`-separated segment is trimmed, leading `--` comment lines are
/// dropped, and empty results are skipped.
///
/// # Examples
/// ```
/// use mr_sql::split_statements;
/// let sql = "CREATE TABLE a (id int);\n-- comment\nCREATE TABLE b (id int);";
/// let stmts: Vec<&str> = split_statements(sql).collect();
/// assert_eq!(stmts, vec!["CREATE TABLE a (id int)", "CREATE TABLE b (id int)"]);
/// ```
pub fn split_statements(sql: &str) -> Statements<'_> {
    Statements {
        segments: sql.split(STATEMENT_DELIMITER),
    }
}

impl<'a> Iterator for Statements<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.segments
            .by_ref()
            .map(strip_leading_comments)
            .find(|stmt| !stmt.is_empty())
    }
}

impl FusedIterator for Statements<'_> {}

/// Trim a segment and drop any `--` comment lines at its start.
fn strip_leading_comments(segment: &str) -> &str {
    let mut rest = segment.trim();
    while rest.starts_with(COMMENT_PREFIX) {
        rest = match rest.split_once('\n') {
            Some((_, tail)) => tail.trim(),
            None => "",
        };
    }
    rest
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
