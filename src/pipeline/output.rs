// src/pipeline/output.rs

//! The two output channels of a pipeline run.
//!
//! The strategies push [`OutputFile`]s into an [`OutputSink`], which
//! partitions them by channel tag into two unbounded tokio channels. The
//! channels are unbounded on purpose: a consumer draining one channel slowly
//! must never block the other channel, and must never block input ingestion.
//! Both channels close when the sink is dropped (run finished or aborted).

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::config::Options;
use crate::engine::OutputFile;
use crate::types::OutputChannel;

/// Write side, held by the active run and handed to the strategy.
pub struct OutputSink {
    primary: mpsc::UnboundedSender<OutputFile>,
    declarations: mpsc::UnboundedSender<OutputFile>,
    base_dir: Arc<OnceLock<PathBuf>>,
    options: Arc<Options>,
}

impl OutputSink {
    /// Emit one output file on its channel.
    ///
    /// Relative destination paths are resolved against the run's base
    /// directory (plus `out_dir`, when configured). Declaration outputs are
    /// dropped entirely unless `declarations = true`.
    pub fn emit(&self, mut file: OutputFile) {
        if file.channel == OutputChannel::Declaration && !self.options.declarations {
            trace!(path = ?file.path, "declarations disabled; dropping output");
            return;
        }

        if file.path.is_relative() {
            if let Some(base) = self.base_dir.get() {
                let mut destination = base.clone();
                if let Some(out_dir) = &self.options.out_dir {
                    destination.push(out_dir);
                }
                destination.push(&file.path);
                file.path = destination;
            }
        }

        let tx = match file.channel {
            OutputChannel::Primary => &self.primary,
            OutputChannel::Declaration => &self.declarations,
        };

        // A dropped receiver means the consumer walked away; outputs for a
        // closed channel are discarded, not an error.
        if tx.send(file).is_err() {
            debug!("output consumer dropped; discarding emitted file");
        }
    }
}

/// Read side of one output channel.
///
/// Independently drained: the pipeline never waits for a stream's consumer.
/// `recv` returns `None` once the run is finished (or aborted) and every
/// buffered output has been taken.
pub struct OutputStream {
    rx: mpsc::UnboundedReceiver<OutputFile>,
}

impl std::fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputStream")
            .field("closed", &self.rx.is_closed())
            .finish_non_exhaustive()
    }
}

impl OutputStream {
    pub async fn recv(&mut self) -> Option<OutputFile> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<OutputFile> {
        self.rx.try_recv().ok()
    }

    /// Drain the stream to completion.
    pub async fn collect(mut self) -> Vec<OutputFile> {
        let mut files = Vec::new();
        while let Some(file) = self.rx.recv().await {
            files.push(file);
        }
        files
    }
}

/// Wire up a sink and its two streams for one run.
pub(crate) fn output_channels(
    base_dir: Arc<OnceLock<PathBuf>>,
    options: Arc<Options>,
) -> (OutputSink, OutputStream, OutputStream) {
    let (primary_tx, primary_rx) = mpsc::unbounded_channel();
    let (declarations_tx, declarations_rx) = mpsc::unbounded_channel();

    let sink = OutputSink {
        primary: primary_tx,
        declarations: declarations_tx,
        base_dir,
        options,
    };

    (
        sink,
        OutputStream { rx: primary_rx },
        OutputStream { rx: declarations_rx },
    )
}
