use crate::error::{Result, SyncError};
use crate::reconcile::UpdatePolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

pub const CONFIG_FILE_NAME: &str = ".projsync.toml";

pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com/graphql";

/// Settings read from `.projsync.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub fields: FieldNames,

    #[serde(default)]
    pub sync: SyncSettings,
}

/// Names of the project fields, as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "default_due_date")]
    pub due_date: String,

    #[serde(default = "default_release")]
    pub release: String,

    #[serde(default = "default_week")]
    pub week: String,

    #[serde(default = "default_estimate")]
    pub estimate: String,

    #[serde(default = "default_size")]
    pub size: String,
}

fn default_due_date() -> String {
    "Due Date".to_string()
}

fn default_release() -> String {
    "Release".to_string()
}

fn default_week() -> String {
    "Week".to_string()
}

fn default_estimate() -> String {
    "Estimate".to_string()
}

fn default_size() -> String {
    "Size".to_string()
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            due_date: default_due_date(),
            release: default_release(),
            week: default_week(),
            estimate: default_estimate(),
            size: default_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default)]
    pub policy: UpdatePolicy,

    #[serde(default = "default_true")]
    pub open_only: bool,

    #[serde(default = "default_true")]
    pub comment: bool,

    #[serde(default = "default_comment_header")]
    pub comment_header: String,
}

fn default_true() -> bool {
    true
}

fn default_comment_header() -> String {
    "The following fields have been updated:".to_string()
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            policy: UpdatePolicy::default(),
            open_only: default_true(),
            comment: default_true(),
            comment_header: default_comment_header(),
        }
    }
}

impl ProjectConfig {
    /// Loads the nearest `.projsync.toml` at or above `start_path`, then the
    /// user config directory. Falls back to defaults when neither exists.
    pub fn load(start_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        let found = Self::find_config_file(start_path).or_else(Self::user_config_file);
        match found {
            Some(path) => Ok((Self::load_from(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProjectConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn user_config_file() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "projsync")?;
        let path = dirs.config_dir().join("config.toml");
        path.exists().then_some(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerType {
    #[default]
    Organization,
    User,
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerType::Organization => write!(f, "organization"),
            OwnerType::User => write!(f, "user"),
        }
    }
}

impl FromStr for OwnerType {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "organization" | "org" => Ok(OwnerType::Organization),
            "user" => Ok(OwnerType::User),
            _ => Err(SyncError::Config(format!("Invalid owner type: {}", s))),
        }
    }
}

/// The GitHub project being synchronised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    pub owner: String,
    pub owner_type: OwnerType,
    pub number: u64,
}

#[derive(Clone)]
pub struct ApiSettings {
    pub endpoint: Url,
    token: String,
}

impl ApiSettings {
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| SyncError::Config(format!("Invalid API endpoint '{}': {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SyncError::Config(format!(
                "API endpoint must be http(s), got '{}'",
                endpoint
            )));
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SyncError::Config("GitHub token is empty".to_string()));
        }
        Ok(Self { endpoint, token })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Everything a run needs, assembled once at startup.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub target: ProjectTarget,
    pub api: ApiSettings,
    pub dry_run: bool,
    pub project: ProjectConfig,
}
