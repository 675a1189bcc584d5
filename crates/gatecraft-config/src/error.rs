use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to expand environment placeholders in {path}: {reason}")]
    EnvExpansion { path: PathBuf, reason: String },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("the model registry must contain at least one entry")]
    EmptyRegistry,

    #[error("duplicate model identifier: {0}")]
    DuplicateModelId(String),

    #[error("router.fallback_model {0:?} does not match any registered model")]
    UnknownFallback(String),

    #[error("router.min_quality_score must be within [0, 1], got {0}")]
    QualityOutOfRange(f64),
}
