// src/strategy/mod.rs

//! The two interchangeable compile strategies.
//!
//! A strategy consumes the run's Source entities one at a time, is told when
//! input is complete, and pushes the outputs it produces into the run's
//! [`OutputSink`]. Which strategy drives a pipeline is decided once, at
//! construction, from the `isolated_units` option:
//!
//! - [`ProjectStrategy`] (default): cross-file analysis may be invalidated by
//!   any single change, so it compiles the whole current generation in one
//!   pass at end-of-input.
//! - [`FileStrategy`]: each file compiles independently as it arrives, which
//!   permits pipelined emission with no end-of-input wait.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::cache::{FileEntity, IncrementalCache};
use crate::engine::OutputFile;
use crate::errors::Result;
use crate::pipeline::OutputSink;
use crate::reporter::Reporter;

pub mod per_file;
pub mod project;

pub use per_file::FileStrategy;
pub use project::ProjectStrategy;

/// Caller-supplied total order for sorted whole-project output.
///
/// The ordering key is deliberately pluggable (dependency order, declaration
/// order, ...); the pipeline does not guess a default.
pub type OutputComparator = Arc<dyn Fn(&OutputFile, &OutputFile) -> Ordering + Send + Sync>;

/// Strategy capability: accept one input entity at a time, be signalled once
/// when input is complete, produce output entities.
pub trait CompileStrategy: Send {
    /// Called for each Source entity, in arrival order, after the cache has
    /// materialized its parsed representation.
    fn input_file(
        &mut self,
        entity: &Arc<FileEntity>,
        sink: &OutputSink,
        reporter: &mut dyn Reporter,
    ) -> Result<()>;

    /// Called exactly once, after the last input of the run.
    fn input_done(
        &mut self,
        cache: &IncrementalCache,
        sink: &OutputSink,
        reporter: &mut dyn Reporter,
    ) -> Result<()>;
}
