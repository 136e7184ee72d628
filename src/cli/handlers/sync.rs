use crate::cli::GitHubArgs;
use crate::github::GitHubClient;
use crate::reconcile::UpdatePolicy;
use crate::sync::Syncer;
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;
use super::utils::print_report;

/// Parameters for the sync operation
pub struct SyncParams {
    pub github: GitHubArgs,
    pub dry_run: bool,
    pub policy: Option<UpdatePolicy>,
    pub all: bool,
    pub json: bool,
}

pub fn handle_sync(ctx: &CommandContext, params: SyncParams) -> Result<()> {
    let project = ctx.project_with(params.policy, params.all);
    let config = ctx.sync_config(&params.github, project, params.dry_run)?;

    let client = GitHubClient::new(&config.api, config.target.clone(), config.project.fields.clone())
        .context("Failed to create GitHub client")?;
    let report = Syncer::new(&config.project, config.dry_run)
        .run(&client)
        .context("Sync failed")?;

    if params.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.dry_run {
            println!("{}", "Dry run: nothing was written.".yellow());
        }
        print_report(&report);
    }

    if report.failed > 0 {
        anyhow::bail!("{} item(s) could not be updated", report.failed);
    }
    Ok(())
}
