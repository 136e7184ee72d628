use crate::config::{CONFIG_FILE_NAME, ProjectConfig};
use crate::error::SyncError;
use anyhow::Result;
use colored::Colorize;

pub fn handle_init(force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        return Err(SyncError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    ProjectConfig::default().save(&config_path)?;

    println!("{} {}", "Initialized".green(), config_path.display());
    println!("  Edit [fields] if your project uses different field names.");

    Ok(())
}
