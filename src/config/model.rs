// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::TargetLevel;

/// Raw settings as read from a TOML file or assembled by the embedder.
///
/// This is a direct mapping of:
///
/// ```toml
/// target = "stable"
/// declarations = true
/// isolated_units = false
/// sorted_output = true
/// fail_fast = false
/// out_dir = "build"
/// ```
///
/// All fields are optional and have reasonable defaults. Semantic validation
/// (conflicting option combinations, etc.) happens in
/// [`Options::try_from`](crate::config::Options); use
/// [`load_and_validate`](crate::config::loader::load_and_validate) for the
/// combined path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    /// Output language level handed to the engine's `parse`.
    #[serde(default)]
    pub target: Option<TargetLevel>,

    /// Emit auxiliary declaration outputs alongside the primary outputs.
    #[serde(default)]
    pub declarations: Option<bool>,

    /// Compile each file in isolation (per-file strategy) instead of running
    /// whole-project passes. Requires that the engine's cross-file analysis
    /// is disabled.
    #[serde(default)]
    pub isolated_units: Option<bool>,

    /// Sort whole-project outputs with the pipeline's output comparator
    /// before emission, instead of natural order.
    #[serde(default)]
    pub sorted_output: Option<bool>,

    /// Treat the first error-severity diagnostic as a hard failure and skip
    /// emission of the outputs it affects.
    #[serde(default)]
    pub fail_fast: Option<bool>,

    /// Directory relative output paths are rooted in, below the run's base
    /// directory.
    #[serde(default)]
    pub out_dir: Option<PathBuf>,

    /// Bundle the whole project into a single output file. Whole-project
    /// strategy only.
    #[serde(default)]
    pub out_file: Option<PathBuf>,
}

/// Validated, immutable compiler options.
///
/// Every field is a closed type fixed at construction; there is no runtime
/// string-to-enum lookup once a cache holds these. Construct via
/// `Options::try_from(RawSettings)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub target: TargetLevel,
    pub declarations: bool,
    pub isolated_units: bool,
    pub sorted_output: bool,
    pub fail_fast: bool,
    pub out_dir: Option<PathBuf>,
    pub out_file: Option<PathBuf>,
}

impl Options {
    /// Internal constructor used after validation has passed.
    pub(crate) fn new_unchecked(raw: RawSettings) -> Self {
        Self {
            target: raw.target.unwrap_or_default(),
            declarations: raw.declarations.unwrap_or(false),
            isolated_units: raw.isolated_units.unwrap_or(false),
            sorted_output: raw.sorted_output.unwrap_or(false),
            fail_fast: raw.fail_fast.unwrap_or(false),
            out_dir: raw.out_dir,
            out_file: raw.out_file,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new_unchecked(RawSettings::default())
    }
}
