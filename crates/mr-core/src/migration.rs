//! Migration file loading

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// A SQL migration script read from disk
///
/// The text is immutable once loaded; line and character counts are computed
/// at load time.
#[derive(Debug, Clone)]
pub struct MigrationScript {
    path: PathBuf,
    raw: String,
    line_count: usize,
    char_count: usize,
}

/// A numbered line of a migration script, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl MigrationScript {
    /// Read a migration script from a file path
    ///
    /// Fails with [`CoreError::MigrationNotFound`] if nothing exists at `path`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::MigrationNotFound {
                path: path.display().to_string(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Self::from_text(path, raw))
    }

    /// Build a script from text already in memory
    pub fn from_text(path: impl Into<PathBuf>, raw: String) -> Self {
        let line_count = raw.lines().count();
        let char_count = raw.chars().count();
        Self {
            path: path.into(),
            raw,
            line_count,
            char_count,
        }
    }

    /// Path the script was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full script text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// First `limit` lines of the script, numbered from 1
    pub fn preview(&self, limit: usize) -> Vec<PreviewLine<'_>> {
        self.raw
            .lines()
            .take(limit)
            .enumerate()
            .map(|(i, text)| PreviewLine { number: i + 1, text })
            .collect()
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
