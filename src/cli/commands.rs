use crate::config::{DEFAULT_API_ENDPOINT, OwnerType};
use crate::reconcile::UpdatePolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "projsync")]
#[command(
    author,
    version,
    about = "Keeps GitHub Project week, release and size fields in sync with due dates and estimates"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .projsync.toml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "PROJSYNC_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .projsync.toml in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Reconcile the project's items and write back changed fields
    Sync {
        #[command(flatten)]
        github: GitHubArgs,

        /// Report what would change without writing anything
        #[arg(long, env = "INPUT_DRY_RUN")]
        dry_run: bool,

        /// Override the update policy from the config file (overwrite, fill-empty)
        #[arg(long, value_parser = UpdatePolicy::from_str)]
        policy: Option<UpdatePolicy>,

        /// Include items whose issue is closed
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what sync would change for a snapshot file, without network access
    Plan {
        /// Snapshot JSON written by `projsync snapshot`
        snapshot: PathBuf,

        /// Override the update policy from the config file (overwrite, fill-empty)
        #[arg(long, value_parser = UpdatePolicy::from_str)]
        policy: Option<UpdatePolicy>,

        /// Include items whose issue is closed
        #[arg(long)]
        all: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the project's fields and items to a snapshot file
    Snapshot {
        #[command(flatten)]
        github: GitHubArgs,

        /// Where to write the snapshot JSON
        output: PathBuf,

        /// Include items whose issue is closed
        #[arg(long)]
        all: bool,
    },

    /// Print the size bucket for an effort estimate such as "3 days"
    Classify {
        /// Estimate text: "<number> <unit>" with unit weeks, days, hours or minutes
        estimate: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Which project to talk to and how to authenticate.
#[derive(Args, Clone)]
pub struct GitHubArgs {
    /// Login of the organization or user owning the project
    #[arg(long, env = "GITHUB_REPOSITORY_OWNER")]
    pub owner: String,

    /// Whether the owner is an organization or a user
    #[arg(
        long,
        env = "INPUT_REPOSITORY_OWNER_TYPE",
        default_value = "organization",
        value_parser = OwnerType::from_str
    )]
    pub owner_type: OwnerType,

    /// Project number as shown in the project URL
    #[arg(long, env = "INPUT_PROJECT_NUMBER")]
    pub project: u64,

    /// GitHub token with project write access
    #[arg(long, env = "INPUT_GH_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GraphQL endpoint (GitHub Enterprise uses its own)
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_API_ENDPOINT)]
    pub api_url: String,
}
