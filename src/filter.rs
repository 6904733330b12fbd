// src/filter.rs

//! Glob-based filtering of emitted outputs.
//!
//! Consumers that only care about part of the output set (e.g. piping a
//! subset of files onward) build an [`OutputFilter`] once and apply it while
//! draining an output stream.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::engine::OutputFile;
use crate::errors::Result;

/// Include/exclude glob patterns over output destination paths.
#[derive(Debug, Clone, Default)]
pub struct FilterSettings {
    /// Patterns a path must match to pass. Empty means "match everything".
    pub include: Vec<String>,
    /// Patterns that reject a path even if it matched `include`.
    pub exclude: Vec<String>,
}

/// Compiled filter.
#[derive(Debug)]
pub struct OutputFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl OutputFilter {
    pub fn new(settings: &FilterSettings) -> Result<Self> {
        Ok(Self {
            include: build_glob_set(&settings.include)?,
            exclude: build_glob_set(&settings.exclude)?,
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        true
    }

    /// Keep only the outputs whose destination path passes the filter.
    pub fn apply(&self, files: Vec<OutputFile>) -> Vec<OutputFile> {
        files
            .into_iter()
            .filter(|file| self.matches(&file.path))
            .collect()
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}
