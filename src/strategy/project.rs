// src/strategy/project.rs

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{FileEntity, IncrementalCache};
use crate::config::Options;
use crate::engine::CompileEngine;
use crate::errors::{RecompError, Result};
use crate::pipeline::OutputSink;
use crate::reporter::Reporter;
use crate::strategy::{CompileStrategy, OutputComparator};

/// Whole-project recompilation.
///
/// Inputs are only counted as they arrive — the current generation of the
/// cache already buffers them — and the single compile pass runs at
/// end-of-input over the generation's *entire* Source set, not just the
/// changed subset: the engine's cross-file analysis may be invalidated by
/// any one change.
pub struct ProjectStrategy {
    engine: Arc<dyn CompileEngine>,
    options: Arc<Options>,
    comparator: Option<OutputComparator>,
    received: usize,
}

impl ProjectStrategy {
    pub fn new(
        engine: Arc<dyn CompileEngine>,
        options: Arc<Options>,
        comparator: Option<OutputComparator>,
    ) -> Self {
        if options.sorted_output && comparator.is_none() {
            warn!("`sorted_output` is set but no output comparator was supplied; using natural order");
        }

        Self {
            engine,
            options,
            comparator,
            received: 0,
        }
    }
}

impl CompileStrategy for ProjectStrategy {
    fn input_file(
        &mut self,
        entity: &Arc<FileEntity>,
        _sink: &OutputSink,
        _reporter: &mut dyn Reporter,
    ) -> Result<()> {
        self.received += 1;
        debug!(path = %entity.path_original, "buffered for project pass");
        Ok(())
    }

    fn input_done(
        &mut self,
        cache: &IncrementalCache,
        sink: &OutputSink,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        let files = cache.current_sources();
        info!(
            files = files.len(),
            received = self.received,
            "starting whole-project pass"
        );

        let mut result = self.engine.compile_project(&files, &self.options);

        // The pass has completed and found everything it is going to find;
        // every diagnostic is delivered exactly once.
        for diagnostic in &result.diagnostics {
            reporter.diagnostic(diagnostic);
        }

        if result.has_errors() && self.options.fail_fast {
            return Err(RecompError::CompileFailed(
                "project pass reported errors (fail_fast)".to_string(),
            ));
        }

        if self.options.sorted_output {
            if let Some(comparator) = &self.comparator {
                result.outputs.sort_by(|a, b| comparator(a, b));
            }
        }

        for output in result.outputs {
            sink.emit(output);
        }

        Ok(())
    }
}
