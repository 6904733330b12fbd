// src/strategy/per_file.rs

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{FileEntity, IncrementalCache};
use crate::config::Options;
use crate::engine::CompileEngine;
use crate::errors::{RecompError, Result};
use crate::pipeline::OutputSink;
use crate::reporter::Reporter;
use crate::strategy::CompileStrategy;

/// Isolated per-file compilation.
///
/// Each file's compilation depends only on its own content and the immutable
/// options, never on sibling files, so outputs are emitted incrementally as
/// input arrives. Appropriate only when the engine's cross-file analysis is
/// disabled (`isolated_units`).
pub struct FileStrategy {
    engine: Arc<dyn CompileEngine>,
    options: Arc<Options>,
    compiled: usize,
    failed: usize,
}

impl FileStrategy {
    pub fn new(engine: Arc<dyn CompileEngine>, options: Arc<Options>) -> Self {
        Self {
            engine,
            options,
            compiled: 0,
            failed: 0,
        }
    }
}

impl CompileStrategy for FileStrategy {
    fn input_file(
        &mut self,
        entity: &Arc<FileEntity>,
        sink: &OutputSink,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        debug!(path = %entity.path_original, "compiling file in isolation");

        let result = self.engine.compile_file(entity, &self.options);

        for diagnostic in &result.diagnostics {
            reporter.diagnostic(diagnostic);
        }

        if result.has_errors() {
            self.failed += 1;

            // A failing file never halts the remaining files unless the
            // fail-fast policy is set, in which case its outputs are skipped
            // and the error surfaces as a hard failure.
            if self.options.fail_fast {
                return Err(RecompError::CompileFailed(format!(
                    "{} (fail_fast)",
                    entity.path_original
                )));
            }
        }

        self.compiled += 1;
        for output in result.outputs {
            sink.emit(output);
        }

        Ok(())
    }

    fn input_done(
        &mut self,
        _cache: &IncrementalCache,
        _sink: &OutputSink,
        _reporter: &mut dyn Reporter,
    ) -> Result<()> {
        info!(
            compiled = self.compiled,
            failed = self.failed,
            "per-file run complete"
        );
        Ok(())
    }
}
