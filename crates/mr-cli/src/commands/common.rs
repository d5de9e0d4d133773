//! Shared utilities for CLI commands

use anyhow::Result;
use mr_core::{CoreError, MigrationScript};
use std::fmt;
use std::path::Path;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit status for a missing migration file
pub(crate) const EXIT_MISSING_FILE: i32 = 1;

/// Exit status for an unreadable or invalid configuration
pub(crate) const EXIT_BAD_CONFIG: i32 = 2;

/// Load the migration file and print its size.
///
/// A missing file is reported on stdout and turned into `ExitCode(1)`.
pub(crate) fn load_migration(path: &Path) -> Result<MigrationScript> {
    match MigrationScript::load(path) {
        Ok(script) => {
            println!("\u{2713} Read migration file: {}", path.display());
            println!("    Lines: {}", script.line_count());
            println!("    Characters: {}", script.char_count());
            println!();
            Ok(script)
        }
        Err(CoreError::MigrationNotFound { path }) => {
            println!("\u{2717} Migration file not found: {}", path);
            Err(ExitCode(EXIT_MISSING_FILE).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the banner shown at the start of every command
pub(crate) fn print_banner(title: &str) {
    println!("{}", title);
    println!("{}", "=".repeat(50));
    println!();
}

/// Format a section heading underlined to at least 50 columns
pub(crate) fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.chars().count().max(50)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_migration_missing_file_exits_1() {
        let dir = tempdir().unwrap();
        let err = load_migration(&dir.path().join("missing.sql")).unwrap_err();
        let code = err.downcast_ref::<ExitCode>().map(|c| c.0);
        assert_eq!(code, Some(EXIT_MISSING_FILE));
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_load_migration_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.sql");
        std::fs::write(&path, "SELECT 1;\nSELECT 2;\n").unwrap();

        let script = load_migration(&path).unwrap();
        assert_eq!(script.line_count(), 2);
    }

    #[test]
    fn test_heading_underline_is_at_least_fifty_wide() {
        let text = heading("Option 1");
        let underline = text.lines().nth(1).unwrap();
        assert_eq!(underline.len(), 50);
    }
}
