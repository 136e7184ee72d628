use anyhow::{Context, Result};
use clap::Parser;

use projsync::cli::handlers::{
    CommandContext, SyncParams, handle_classify, handle_init, handle_plan, handle_snapshot,
    handle_sync,
};
use projsync::cli::{Cli, Commands};
use projsync::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    match cli.command {
        Commands::Init { force } => handle_init(force),
        Commands::Classify { estimate, json } => handle_classify(estimate, json),
        Commands::Plan {
            snapshot,
            policy,
            all,
            json,
        } => {
            let ctx = load_context(&cli.config)?;
            handle_plan(&ctx, &snapshot, policy, all, json)
        }
        Commands::Sync {
            github,
            dry_run,
            policy,
            all,
            json,
        } => {
            let ctx = load_context(&cli.config)?;
            handle_sync(
                &ctx,
                SyncParams {
                    github,
                    dry_run,
                    policy,
                    all,
                    json,
                },
            )
        }
        Commands::Snapshot {
            github,
            output,
            all,
        } => {
            let ctx = load_context(&cli.config)?;
            handle_snapshot(&ctx, &github, &output, all)
        }
    }
}

fn load_context(config: &Option<std::path::PathBuf>) -> Result<CommandContext> {
    let ctx = CommandContext::load(config.as_deref()).context("Failed to load projsync configuration")?;
    match ctx.config_path {
        Some(ref path) => tracing::debug!(path = %path.display(), "Loaded config"),
        None => tracing::debug!("No config file found, using defaults"),
    }
    Ok(ctx)
}
