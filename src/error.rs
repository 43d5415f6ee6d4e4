//! Error types for configuration loading.
//!
//! The simulation itself never fails: bad measurements leave it inert and
//! numeric corner cases skip the affected update. Only reading and checking
//! configuration can produce an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum LanyardError {
    /// A configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// RON text was not syntactically valid.
    #[error("physics config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
    /// RON parsed but did not match the config schema.
    #[error("physics config does not match schema: {0}")]
    ConfigDeserialize(#[from] ron::Error),
    /// The badge record was not valid JSON for `BadgeConfigOverrides`.
    #[error("badge config parse error: {0}")]
    BadgeConfigParse(#[from] serde_json::Error),
    /// A field holds a value the simulation cannot use.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, LanyardError>;
