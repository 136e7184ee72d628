use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project has no field named '{0}'")]
    MissingField(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}: {1}")]
    HttpStatus(u16, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Project config already exists at {0}")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
