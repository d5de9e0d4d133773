//! Runtime context for CLI commands

use anyhow::{Context, Result};
use mr_core::Config;
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// Shown in place of a project identifier that was never configured
pub(crate) const PROJECT_REF_PLACEHOLDER: &str = "<project-ref>";

/// Configuration resolved once at startup and shared by every command
#[derive(Debug)]
pub(crate) struct RuntimeContext {
    /// The loaded project configuration
    pub config: Config,

    /// Selected target, if any
    pub target: Option<String>,

    /// Absolute or project-relative path of the migration file
    pub migration_path: PathBuf,

    /// Hosted project identifier, if configured
    pub project_ref: Option<String>,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let config =
            Config::load_from_dir(&args.project_dir).context("Failed to load configuration")?;
        let target = Config::resolve_target(args.target.as_deref());

        let migration_path = match &args.file {
            Some(file) => args.project_dir.join(file),
            None => config.migration_path(&args.project_dir),
        };

        let project_ref = match &args.project_ref {
            Some(project_ref) if !project_ref.trim().is_empty() => Some(project_ref.clone()),
            _ => config
                .get_project_ref(target.as_deref())
                .context("Failed to resolve project_ref")?,
        };

        if let Some(ref target_name) = target {
            log::debug!("Using target '{}'", target_name);
        }
        log::debug!("Migration file: {}", migration_path.display());

        Ok(Self {
            config,
            target,
            migration_path,
            project_ref,
        })
    }

    /// Project identifier for display, or a placeholder when unset
    pub fn project_ref_or_placeholder(&self) -> &str {
        self.project_ref
            .as_deref()
            .unwrap_or(PROJECT_REF_PLACEHOLDER)
    }

    /// Database URL from the config file for the selected target
    pub fn configured_database_url(&self) -> Result<Option<String>> {
        self.config
            .get_database_url(self.target.as_deref())
            .context("Failed to resolve database URL")
    }
}
