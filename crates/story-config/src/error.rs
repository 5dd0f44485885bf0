use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read stories configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Commands that talk to the CMS need this section filled in.
    #[error("[{section}] is not configured")]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
