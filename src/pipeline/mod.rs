// src/pipeline/mod.rs

//! The pipeline orchestrator.
//!
//! A [`Pipeline`] owns the incremental cache and the configuration for its
//! whole lifetime and hands out one [`PipelineRun`] at a time. Each run:
//!
//! - ingests input records sequentially, in arrival order,
//! - feeds every record through the cache (classify + materialize) and then
//!   into the strategy chosen at pipeline construction,
//! - exposes two independently-drained output streams (primary and
//!   declaration outputs),
//! - signals end-of-input exactly once via [`PipelineRun::finish`].
//!
//! Starting a second run while one is live is a programming error and fails
//! immediately with [`RecompError::PipelineBusy`] — the cache's generation
//! state is not safe to share across overlapping runs.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing::{debug, info, warn};

use crate::cache::{FileEntity, FileKind, IncrementalCache};
use crate::config::Options;
use crate::engine::{CompileEngine, Diagnostic, OutputFile};
use crate::errors::{RecompError, Result};
use crate::reporter::{default_reporter, Reporter};
use crate::strategy::{CompileStrategy, FileStrategy, OutputComparator, ProjectStrategy};

pub mod input;
pub mod output;

pub use input::InputRecord;
pub use output::{OutputSink, OutputStream};

/// Lock the shared cache, recovering from a poisoned mutex: the cache holds
/// no invariants a panicked run could have broken halfway (entities are
/// immutable once inserted).
fn lock(cache: &Arc<Mutex<IncrementalCache>>) -> MutexGuard<'_, IncrementalCache> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Incremental compile pipeline, reusable across runs.
///
/// The strategy variant is fixed at construction from the options: per-file
/// when `isolated_units` is set, whole-project otherwise.
pub struct Pipeline {
    cache: Arc<Mutex<IncrementalCache>>,
    engine: Arc<dyn CompileEngine>,
    options: Arc<Options>,
    comparator: Option<OutputComparator>,
    running: Arc<AtomicBool>,
    started_once: bool,
}

impl Pipeline {
    pub fn new(engine: Arc<dyn CompileEngine>, options: Options) -> Self {
        let options = Arc::new(options);
        let cache = IncrementalCache::new(Arc::clone(&engine), Arc::clone(&options));

        Self {
            cache: Arc::new(Mutex::new(cache)),
            engine,
            options,
            comparator: None,
            running: Arc::new(AtomicBool::new(false)),
            started_once: false,
        }
    }

    /// Supply the total order used for `sorted_output` project passes.
    pub fn with_output_order(
        mut self,
        comparator: impl Fn(&OutputFile, &OutputFile) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Begin a run with the default (tracing) reporter.
    pub fn start(&mut self) -> Result<(PipelineRun, OutputStream, OutputStream)> {
        self.start_with_reporter(default_reporter())
    }

    /// Begin a run, refusing if one is already in flight.
    ///
    /// The busy check happens before any input is accepted; the new
    /// generation is only opened once the check has passed.
    pub fn start_with_reporter(
        &mut self,
        reporter: Box<dyn Reporter>,
    ) -> Result<(PipelineRun, OutputStream, OutputStream)> {
        if self.running.swap(true, AtomicOrdering::SeqCst) {
            return Err(RecompError::PipelineBusy);
        }

        // The first run fills generation 0 directly; each later run opens a
        // fresh generation, demoting the last one to `previous`.
        if self.started_once {
            lock(&self.cache).reset();
        }
        self.started_once = true;

        let base_dir = Arc::new(OnceLock::new());
        let (sink, primary, declarations) =
            output::output_channels(Arc::clone(&base_dir), Arc::clone(&self.options));

        let strategy: Box<dyn CompileStrategy> = if self.options.isolated_units {
            Box::new(FileStrategy::new(
                Arc::clone(&self.engine),
                Arc::clone(&self.options),
            ))
        } else {
            Box::new(ProjectStrategy::new(
                Arc::clone(&self.engine),
                Arc::clone(&self.options),
                self.comparator.clone(),
            ))
        };

        info!(
            version = lock(&self.cache).version(),
            isolated = self.options.isolated_units,
            "pipeline run started"
        );

        Ok((
            PipelineRun {
                cache: Arc::clone(&self.cache),
                strategy,
                sink,
                reporter,
                base_dir,
                running: Arc::clone(&self.running),
                finished: false,
            },
            primary,
            declarations,
        ))
    }

    /// Classify how a path changed between the previous and current
    /// generation. Valid between runs as well as during one.
    pub fn file_change(&self, name: &str) -> crate::cache::FileChange {
        lock(&self.cache).get_file_change(name)
    }

    /// Current-generation lookup.
    pub fn file(&self, name: &str) -> Option<Arc<FileEntity>> {
        lock(&self.cache).get_file(name)
    }
}

/// One in-flight run of a [`Pipeline`].
///
/// Dropping the run without calling [`finish`](PipelineRun::finish) aborts
/// it: both output streams close (possibly incomplete) and the partial
/// generation is discarded so the next run starts clean.
pub struct PipelineRun {
    cache: Arc<Mutex<IncrementalCache>>,
    strategy: Box<dyn CompileStrategy>,
    sink: OutputSink,
    reporter: Box<dyn Reporter>,
    base_dir: Arc<OnceLock<PathBuf>>,
    running: Arc<AtomicBool>,
    finished: bool,
}

impl std::fmt::Debug for PipelineRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRun")
            .field("base_dir", &self.base_dir.get())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl PipelineRun {
    /// Ingest one input record.
    ///
    /// The first record of the run fixes the base directory; every record is
    /// inserted into the cache (materializing Source entities), and Source
    /// entities are then handed to the strategy. Config entities are cached
    /// for change detection only.
    pub fn feed(&mut self, record: InputRecord) -> Result<()> {
        if self.base_dir.get().is_none() {
            let dir = base_dir_of(&record);
            debug!(base_dir = ?dir, "captured base directory from first record");
            let _ = self.base_dir.set(dir);
        }

        let entity = FileEntity::from_content(record.path, record.content);
        let entity = lock(&self.cache).add(entity);

        if entity.kind == FileKind::Source {
            self.strategy
                .input_file(&entity, &self.sink, self.reporter.as_mut())?;
        }

        Ok(())
    }

    /// Decode raw bytes and ingest them.
    ///
    /// A record that cannot be decoded is reported and skipped; it never
    /// aborts the run.
    pub fn feed_bytes(&mut self, path: impl Into<String>, bytes: &[u8]) -> Result<()> {
        let path = path.into();

        match InputRecord::from_bytes(path.clone(), bytes) {
            Ok(record) => self.feed(record),
            Err(err @ RecompError::InputDecode { .. }) => {
                warn!(path = %path, "skipping undecodable input record: {err}");
                self.reporter
                    .diagnostic(&Diagnostic::error(Some(path), err.to_string()));
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Signal end-of-input and complete the run.
    ///
    /// Runs the strategy's completion step (the whole-project pass happens
    /// here), then closes both output streams. After this, each stream
    /// yields its buffered outputs and then terminates.
    pub fn finish(mut self) -> Result<()> {
        let result = {
            let cache = lock(&self.cache);
            self.strategy
                .input_done(&cache, &self.sink, self.reporter.as_mut())
        };

        self.finished = true;
        info!("pipeline run finished");
        result
        // Drop closes the sink (terminating both streams) and releases the
        // busy flag.
    }
}

impl Drop for PipelineRun {
    fn drop(&mut self) {
        if !self.finished {
            // Aborted mid-run: never leave a partial generation referenced
            // as `current` for a subsequent run.
            lock(&self.cache).discard_current();
            debug!("pipeline run aborted");
        }
        self.running.store(false, AtomicOrdering::SeqCst);
    }
}

fn base_dir_of(record: &InputRecord) -> PathBuf {
    if let Some(dir) = &record.base_dir {
        return dir.clone();
    }

    match Path::new(&record.path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
