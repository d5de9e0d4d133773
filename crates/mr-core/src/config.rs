//! Configuration types and parsing for migrun.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file names searched in the project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["migrun.yml", "migrun.yaml"];

/// Environment variable selecting a named target
pub const TARGET_ENV_VAR: &str = "MIGRUN_TARGET";

const DEFAULT_MIGRATION_FILE: &str = "migrate-database.sql";

const DEFAULT_DASHBOARD_URL: &str = "https://supabase.com/dashboard";

/// Project configuration from migrun.yml
///
/// Every field is optional; a project without a config file behaves as if
/// it had an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hosted project identifier used in dashboard links and CLI commands
    #[serde(default)]
    pub project_ref: Option<String>,

    /// Base URL of the provider dashboard
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    /// Migration file, relative to the project directory
    #[serde(default = "default_migration_file")]
    pub migration_file: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Named target configurations (e.g., dev, prod)
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,

    /// Tables expected to exist once the migration has been applied
    #[serde(default)]
    pub expect_tables: Vec<String>,
}

/// Database connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL (`postgresql://...` or `duckdb://...`)
    #[serde(default)]
    pub url: Option<String>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Project identifier override
    #[serde(default)]
    pub project_ref: Option<String>,
}

fn default_dashboard_url() -> String {
    DEFAULT_DASHBOARD_URL.to_string()
}

fn default_migration_file() -> String {
    DEFAULT_MIGRATION_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_ref: None,
            dashboard_url: default_dashboard_url(),
            migration_file: default_migration_file(),
            database: DatabaseConfig::default(),
            targets: HashMap::new(),
            expect_tables: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for migrun.yml or migrun.yaml and falls back to defaults when
    /// neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => {
                log::debug!("No config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    /// Locate the config file in a project directory, if any
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migration_file.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migration_file cannot be empty".to_string(),
            });
        }

        if !(self.dashboard_url.starts_with("https://") || self.dashboard_url.starts_with("http://"))
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "dashboard_url must be an http(s) URL, found '{}'",
                    self.dashboard_url
                ),
            });
        }

        let refs = std::iter::once(&self.project_ref)
            .chain(self.targets.values().map(|t| &t.project_ref));
        for project_ref in refs.flatten() {
            if project_ref.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "project_ref cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Absolute path of the migration file for a project root
    pub fn migration_path(&self, root: &Path) -> PathBuf {
        root.join(&self.migration_file)
    }

    /// Get target configuration by name
    pub fn get_target(&self, name: &str) -> Option<&TargetConfig> {
        self.targets.get(name)
    }

    /// Get the list of available target names, sorted
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn resolved_target(&self, target: Option<&str>) -> CoreResult<Option<&TargetConfig>> {
        let Some(name) = target else {
            return Ok(None);
        };
        self.get_target(name)
            .map(Some)
            .ok_or_else(|| CoreError::TargetNotFound {
                name: name.to_string(),
                available: match self.available_targets() {
                    names if names.is_empty() => "(none)".to_string(),
                    names => names.join(", "),
                },
            })
    }

    /// Get the database URL, applying target overrides if specified
    pub fn get_database_url(&self, target: Option<&str>) -> CoreResult<Option<String>> {
        let from_target = self
            .resolved_target(target)?
            .and_then(|t| t.database.as_ref())
            .and_then(|db| db.url.clone());
        Ok(from_target.or_else(|| self.database.url.clone()))
    }

    /// Get the project identifier, applying target overrides if specified
    pub fn get_project_ref(&self, target: Option<&str>) -> CoreResult<Option<String>> {
        let from_target = self
            .resolved_target(target)?
            .and_then(|t| t.project_ref.clone());
        Ok(from_target.or_else(|| self.project_ref.clone()))
    }

    /// Resolve target from CLI flag or MIGRUN_TARGET environment variable
    ///
    /// Priority: CLI flag > MIGRUN_TARGET env var > None
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var(TARGET_ENV_VAR).ok())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
