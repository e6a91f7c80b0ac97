use thiserror::Error;

#[derive(Error, Debug)]
pub enum CronmonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Duplicate project '{slug}' in organization '{organization}'")]
    DuplicateProject { organization: String, slug: String },

    #[error("Unknown organization: {0}")]
    UnknownOrganization(String),
}

/// Result alias for fallible cronmon operations.
pub type Result<T> = std::result::Result<T, CronmonError>;
