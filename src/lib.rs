// src/lib.rs

//! `recomp` — an incremental-compilation orchestrator.
//!
//! `recomp` sits in front of a batch source-to-output compiler (supplied by
//! the embedder through the [`engine::CompileEngine`] trait) and makes
//! repeated invocations cheap:
//!
//! - the [`cache`] tracks per-file change state across build generations and
//!   reuses parsed representations for byte-identical files,
//! - a [`strategy`] — whole-project or isolated per-file, chosen once from
//!   the options — turns the batch of inputs into outputs,
//! - the [`pipeline`] streams those outputs into two independently-drained
//!   channels: primary outputs and auxiliary declaration outputs.
//!
//! A minimal run looks like:
//!
//! ```ignore
//! let options = Options::try_from(RawSettings::default())?;
//! let mut pipeline = Pipeline::new(engine, options);
//!
//! let (mut run, primary, declarations) = pipeline.start()?;
//! run.feed(InputRecord::new("src/a.ts", "let x = 1;"))?;
//! run.finish()?;
//!
//! let outputs = primary.collect().await;
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod reporter;
pub mod strategy;
pub mod types;

pub use cache::{ChangeState, FileChange, FileEntity, FileKind, IncrementalCache};
pub use config::{Options, RawSettings};
pub use engine::{CompileEngine, CompileResult, Diagnostic, OutputFile, ParsedSource, Severity};
pub use errors::{RecompError, Result};
pub use pipeline::{InputRecord, OutputStream, Pipeline, PipelineRun};
pub use types::{OutputChannel, TargetLevel};
