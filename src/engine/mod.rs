// src/engine/mod.rs

//! The opaque compiler boundary.
//!
//! The orchestrator never parses, type-checks or generates code itself; it
//! drives an engine supplied by the embedder through the [`CompileEngine`]
//! trait. One adapter implements the trait per supported engine version, and
//! the adapter is selected once when the pipeline is constructed, never per
//! call.
//!
//! Parsed representations are opaque to this crate: we store them, compare
//! them by reference identity for reuse, and hand them back. Nothing here
//! looks inside.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::FileEntity;
use crate::config::Options;
use crate::types::{OutputChannel, TargetLevel};

/// Opaque handle to an engine-produced parsed representation.
///
/// Cloning is cheap (it clones the `Arc`), and [`ParsedSource::ptr_eq`] makes
/// cache reuse observable: a reused representation is reference-identical to
/// the one produced in the previous generation.
#[derive(Clone)]
pub struct ParsedSource(Arc<dyn Any + Send + Sync>);

impl ParsedSource {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Whether two handles point at the same underlying representation.
    pub fn ptr_eq(a: &ParsedSource, b: &ParsedSource) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Downcast for the engine that produced the value; the orchestrator
    /// itself never calls this.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for ParsedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ParsedSource").finish()
    }
}

/// Severity of an engine diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A single diagnostic produced by the engine.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Original path of the file the diagnostic refers to, if any.
    pub file: Option<String>,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(file: impl Into<Option<String>>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(file: impl Into<Option<String>>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// One file emitted by the engine.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Destination path. May be relative; the pipeline resolves it against
    /// the run's base directory before emission.
    pub path: PathBuf,
    pub content: String,
    pub channel: OutputChannel,
    /// Normalised path of the source entity this output was produced from,
    /// so consumers can pair a primary output with its declaration
    /// counterpart.
    pub source: Option<String>,
}

/// Result of a `compile_project` or `compile_file` call.
///
/// Diagnostics are accumulated data, never thrown: the engine reports
/// everything it found and the orchestrator decides (via the fail-fast
/// policy) whether any of it is fatal.
#[derive(Debug, Default)]
pub struct CompileResult {
    pub outputs: Vec<OutputFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Trait abstracting the batch compiler the orchestrator drives.
///
/// Implementations adapt one concrete engine version. The orchestrator holds
/// the engine behind `Arc<dyn CompileEngine>` and calls:
///
/// - [`CompileEngine::parse`] from the cache's materialize step, with a
///   version tag derived from the current build generation so downstream
///   consumers can tell which generation produced a representation;
/// - [`CompileEngine::compile_project`] from the whole-project strategy;
/// - [`CompileEngine::compile_file`] from the per-file strategy.
pub trait CompileEngine: Send + Sync {
    fn parse(
        &self,
        path: &str,
        content: &str,
        target: TargetLevel,
        version_tag: &str,
    ) -> ParsedSource;

    fn compile_project(&self, files: &[Arc<FileEntity>], options: &Options) -> CompileResult;

    fn compile_file(&self, file: &FileEntity, options: &Options) -> CompileResult;
}
