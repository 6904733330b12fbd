// src/cache/generation.rs

//! One build generation's dictionary of file entities.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::entity::{FileEntity, FileKind};

/// Set of entities belonging to a single build generation, keyed by
/// normalised path.
///
/// Write-once per key over the generation's lifetime: there is no deletion,
/// and re-inserting a path supersedes the earlier entry (re-adding a file
/// during one build wins over the first add). Insertion order is preserved so
/// a whole-project pass over the generation is deterministic.
///
/// The dictionary knows nothing about previous generations; the reuse logic
/// lives in the materialize hook the cache passes into [`Generation::insert_with`].
#[derive(Debug, Default)]
pub struct Generation {
    files: HashMap<String, Arc<FileEntity>>,
    order: Vec<String>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, running `materialize` first for Source entities so
    /// the parsed representation is in place before anything can observe the
    /// entity in this generation.
    pub fn insert_with(
        &mut self,
        entity: FileEntity,
        materialize: impl FnOnce(&FileEntity),
    ) -> Arc<FileEntity> {
        if entity.kind == FileKind::Source {
            materialize(&entity);
        }

        let key = entity.path_normalized.clone();
        let entity = Arc::new(entity);

        if self.files.insert(key.clone(), Arc::clone(&entity)).is_some() {
            debug!(path = %key, "superseding earlier entry in this generation");
        } else {
            self.order.push(key);
        }

        entity
    }

    /// Look a path up by its normalised form.
    pub fn lookup(&self, path_normalized: &str) -> Option<Arc<FileEntity>> {
        self.files.get(path_normalized).cloned()
    }

    /// All entities, in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &Arc<FileEntity>> {
        self.order.iter().filter_map(|key| self.files.get(key))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
