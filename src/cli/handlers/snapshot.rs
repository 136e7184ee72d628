use crate::backend::{ItemFilter, ProjectBackend};
use crate::cli::GitHubArgs;
use crate::github::GitHubClient;
use crate::snapshot::Snapshot;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::CommandContext;

pub fn handle_snapshot(ctx: &CommandContext, github: &GitHubArgs, output: &Path, all: bool) -> Result<()> {
    let project = ctx.project_with(None, all);
    let config = ctx.sync_config(github, project, true)?;

    let client = GitHubClient::new(&config.api, config.target.clone(), config.project.fields.clone())
        .context("Failed to create GitHub client")?;
    let schema = client.project_schema().context("Failed to fetch project fields")?;
    let items = client
        .project_items(ItemFilter {
            open_only: config.project.sync.open_only,
        })
        .context("Failed to fetch project items")?;

    let snapshot = Snapshot { schema, items };
    snapshot
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} {} fields, {} items -> {}",
        "Saved".green(),
        snapshot.schema.fields.len(),
        snapshot.items.len(),
        output.display()
    );
    Ok(())
}
