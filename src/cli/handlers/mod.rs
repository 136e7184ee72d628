mod classify;
mod init;
mod plan;
mod snapshot;
mod sync;
mod utils;

pub use classify::handle_classify;
pub use init::handle_init;
pub use plan::handle_plan;
pub use snapshot::handle_snapshot;
pub use sync::{SyncParams, handle_sync};

use crate::cli::GitHubArgs;
use crate::config::{ApiSettings, ProjectConfig, ProjectTarget, SyncConfig};
use crate::error::Result;
use crate::reconcile::UpdatePolicy;
use std::path::{Path, PathBuf};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub project: ProjectConfig,
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Loads `explicit` when given, otherwise searches from the working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Ok(Self {
                project: ProjectConfig::load_from(path)?,
                config_path: Some(path.to_path_buf()),
            }),
            None => {
                let cwd = std::env::current_dir()?;
                let (project, config_path) = ProjectConfig::load(&cwd)?;
                Ok(Self {
                    project,
                    config_path,
                })
            }
        }
    }

    /// Project settings with command-line overrides applied.
    pub fn project_with(&self, policy: Option<UpdatePolicy>, all: bool) -> ProjectConfig {
        let mut project = self.project.clone();
        if let Some(policy) = policy {
            project.sync.policy = policy;
        }
        if all {
            project.sync.open_only = false;
        }
        project
    }

    pub fn sync_config(&self, github: &GitHubArgs, project: ProjectConfig, dry_run: bool) -> Result<SyncConfig> {
        Ok(SyncConfig {
            target: ProjectTarget {
                owner: github.owner.clone(),
                owner_type: github.owner_type,
                number: github.project,
            },
            api: ApiSettings::new(&github.api_url, github.token.clone())?,
            dry_run,
            project,
        })
    }
}
