// src/cache/incremental.rs

//! The two-generation incremental cache.

use std::mem;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::entity::{classify, FileChange, FileEntity, FileKind};
use crate::cache::generation::Generation;
use crate::cache::path_utils::normalize_path;
use crate::config::Options;
use crate::engine::CompileEngine;

/// Cache of parsed representations across consecutive build generations.
///
/// Owns exactly two generations at a time: `current` (being filled by the
/// active run) and `previous` (the last completed one). When `reset` begins a
/// new generation, the generation two steps back is dropped — there is no
/// history beyond one step.
///
/// The options are attached at construction and immutable for the cache's
/// lifetime; nothing may mutate them afterwards.
pub struct IncrementalCache {
    previous: Option<Generation>,
    current: Generation,
    version: u64,
    options: Arc<Options>,
    engine: Arc<dyn CompileEngine>,
}

impl std::fmt::Debug for IncrementalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncrementalCache")
            .field("version", &self.version)
            .field("current_len", &self.current.len())
            .field("has_previous", &self.previous.is_some())
            .finish_non_exhaustive()
    }
}

impl IncrementalCache {
    pub fn new(engine: Arc<dyn CompileEngine>, options: Arc<Options>) -> Self {
        Self {
            previous: None,
            current: Generation::new(),
            version: 0,
            options,
            engine,
        }
    }

    /// Current generation counter. Starts at 0; incremented by [`reset`].
    ///
    /// [`reset`]: IncrementalCache::reset
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn options(&self) -> &Arc<Options> {
        &self.options
    }

    /// Begin a new generation: bump the counter, demote current to previous.
    ///
    /// The generation that was `previous` until now is dropped here, which is
    /// what bounds the cache at one step of history.
    pub fn reset(&mut self) {
        self.version += 1;
        self.previous = Some(mem::take(&mut self.current));
        debug!(version = self.version, "cache advanced to new generation");
    }

    /// Drop the current generation without advancing the counter.
    ///
    /// Used when a run is aborted mid-way, so a partial generation is never
    /// left referenced as `current` for a subsequent run.
    pub fn discard_current(&mut self) {
        if !self.current.is_empty() {
            debug!(
                version = self.version,
                files = self.current.len(),
                "discarding partial generation"
            );
        }
        self.current = Generation::new();
    }

    /// Insert an entity into the current generation, materializing a parsed
    /// representation for Source entities.
    ///
    /// Materialize is the reuse algorithm: if the previous generation holds
    /// an equal entity at the same normalised path, its parsed representation
    /// is carried over untouched (reference-identical, no reparse).
    /// Otherwise the engine parses the new content, tagged with the current
    /// generation counter so consumers can tell generations apart.
    pub fn add(&mut self, entity: FileEntity) -> Arc<FileEntity> {
        let previous = self
            .previous
            .as_ref()
            .and_then(|generation| generation.lookup(&entity.path_normalized));

        let engine = Arc::clone(&self.engine);
        let target = self.options.target;
        let version_tag = self.version.to_string();

        self.current.insert_with(entity, |file| {
            if let Some(prev) = previous.as_deref() {
                if prev.is_equal(file) {
                    if let Some(parsed) = prev.parsed() {
                        trace!(path = %file.path_normalized, "reusing parsed representation");
                        file.set_parsed(parsed.clone());
                        return;
                    }
                }
            }

            trace!(path = %file.path_normalized, version = %version_tag, "parsing");
            let parsed = engine.parse(&file.path_original, &file.content, target, &version_tag);
            file.set_parsed(parsed);
        })
    }

    /// Look a file up in the current generation only.
    ///
    /// A miss is a normal outcome, not an error.
    pub fn get_file(&self, name: &str) -> Option<Arc<FileEntity>> {
        self.current.lookup(&normalize_path(name))
    }

    /// Classify how a path changed between the previous and the current
    /// generation.
    pub fn get_file_change(&self, name: &str) -> FileChange {
        let key = normalize_path(name);

        let previous = self
            .previous
            .as_ref()
            .and_then(|generation| generation.lookup(&key));
        let current = self.current.lookup(&key);

        let state = classify(previous.as_deref(), current.as_deref());

        FileChange {
            previous,
            current,
            state,
        }
    }

    /// All Source entities of the current generation, in insertion order.
    ///
    /// This is the file set a whole-project pass compiles: the full current
    /// generation, not just the changed subset, because a single change can
    /// invalidate cross-file analysis anywhere.
    pub fn current_sources(&self) -> Vec<Arc<FileEntity>> {
        self.current
            .files()
            .filter(|file| file.kind == FileKind::Source)
            .cloned()
            .collect()
    }

    /// Number of entities in the current generation.
    pub fn current_len(&self) -> usize {
        self.current.len()
    }
}
