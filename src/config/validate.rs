// src/config/validate.rs

use tracing::warn;

use crate::config::model::{Options, RawSettings};
use crate::errors::{RecompError, Result};

impl TryFrom<RawSettings> for Options {
    type Error = RecompError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        let raw = validate_raw_settings(raw)?;
        Ok(Options::new_unchecked(raw))
    }
}

/// Configuration errors surface here, before any run starts — never mid-run.
///
/// Hard errors reject the settings outright; recoverable conflicts are
/// logged as warnings and the conflicting flags are dropped, matching how
/// the original toolchain treats them.
fn validate_raw_settings(mut raw: RawSettings) -> Result<RawSettings> {
    if raw.out_file.is_some() && raw.out_dir.is_some() {
        return Err(RecompError::ConfigError(
            "`out_file` and `out_dir` cannot be combined; pick one".to_string(),
        ));
    }

    if raw.isolated_units == Some(true) {
        if raw.out_file.is_some() || raw.sorted_output == Some(true) {
            warn!(
                "`isolated_units` cannot be combined with `out_file` or `sorted_output`; \
                 ignoring the conflicting options"
            );
            raw.out_file = None;
            raw.sorted_output = Some(false);
        }

        // Isolated compilation sees one file at a time, which is not enough
        // to produce project-wide declarations.
        if raw.declarations == Some(true) {
            warn!("`isolated_units` disables declaration output");
            raw.declarations = Some(false);
        }
    }

    Ok(raw)
}
