use crate::reconcile::UpdatePolicy;
use crate::snapshot::SnapshotBackend;
use crate::sync::Syncer;
use anyhow::{Context, Result};
use std::path::Path;

use super::CommandContext;
use super::utils::print_report;

pub fn handle_plan(
    ctx: &CommandContext,
    snapshot: &Path,
    policy: Option<UpdatePolicy>,
    all: bool,
    json: bool,
) -> Result<()> {
    let backend = SnapshotBackend::load(snapshot)
        .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;
    let project = ctx.project_with(policy, all);

    let report = Syncer::new(&project, true).run(&backend)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
