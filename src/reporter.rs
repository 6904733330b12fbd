// src/reporter.rs

//! Diagnostic reporting collaborator.
//!
//! The orchestrator forwards every engine diagnostic to a [`Reporter`]
//! exactly once per occurrence and never drops one on the floor. What a
//! reporter does with them (console rendering, collection, IDE protocol) is
//! outside the core.

use tracing::{error, warn};

use crate::engine::{Diagnostic, Severity};

/// Receiver for engine diagnostics.
pub trait Reporter: Send {
    fn diagnostic(&mut self, diagnostic: &Diagnostic);
}

/// Default reporter: forwards diagnostics through `tracing`.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                error!(file = ?diagnostic.file, "{}", diagnostic.message);
            }
            Severity::Warning => {
                warn!(file = ?diagnostic.file, "{}", diagnostic.message);
            }
        }
    }
}

/// The reporter used when the embedder does not supply one.
pub fn default_reporter() -> Box<dyn Reporter> {
    Box::new(LogReporter)
}
