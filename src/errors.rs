// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecompError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input record {path:?} could not be decoded: {reason}")]
    InputDecode { path: PathBuf, reason: String },

    #[error(
        "Pipeline is busy: a pipeline cannot drive two runs at the same time; \
         finish or drop the active run first"
    )]
    PipelineBusy,

    #[error("Compilation failed: {0}")]
    CompileFailed(String),

    #[error("Invalid filter pattern: {0}")]
    FilterPattern(#[from] globset::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RecompError>;
