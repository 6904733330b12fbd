// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{Options, RawSettings};
use crate::errors::Result;

/// Load settings from a TOML file and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (conflicting options, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load settings from a path and run validation.
///
/// This is the recommended entry point for embedders that keep their options
/// in a file:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Rejects invalid option combinations and downgrades recoverable
///   conflicts to warnings.
///
/// The resulting [`Options`] are handed to the pipeline once and are
/// immutable from then on.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Options> {
    let raw = load_from_path(&path)?;
    let options = Options::try_from(raw)?;
    Ok(options)
}
