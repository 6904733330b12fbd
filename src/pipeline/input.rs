// src/pipeline/input.rs

use std::path::PathBuf;

use crate::errors::{RecompError, Result};

/// One input file handed to a pipeline run.
///
/// Carries the original path exactly as supplied (the cache normalises its
/// own copy for keying), the decoded text content, and optionally the
/// directory the record was picked up from — the first record of a run fixes
/// the base directory used to resolve relative output paths.
#[derive(Debug, Clone)]
pub struct InputRecord {
    pub path: String,
    pub content: String,
    pub base_dir: Option<PathBuf>,
}

impl InputRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            base_dir: None,
        }
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Decode raw bytes into a record, stripping a UTF-8 BOM if present.
    ///
    /// A record that cannot be decoded is an input error for that record
    /// only; callers report it and move on to the next record.
    pub fn from_bytes(path: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let path = path.into();

        let text = std::str::from_utf8(bytes).map_err(|e| RecompError::InputDecode {
            path: PathBuf::from(&path),
            reason: e.to_string(),
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        Ok(Self::new(path, text))
    }
}
