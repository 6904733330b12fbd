// src/cache/entity.rs

//! The versioned file entity and the pure change classifier.

use std::sync::OnceLock;

use crate::cache::path_utils::{extension_lowercase, normalize_path};
use crate::engine::ParsedSource;

/// What kind of artifact an entity represents.
///
/// Config entities (project configuration files) are cached for change
/// detection but never parsed or compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Source,
    Config,
}

/// Change classification between two consecutive generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeState {
    New,
    Equal,
    Modified,
    Deleted,
    NotFound,
}

/// One file at one point in time.
///
/// Content is immutable once created. The parsed representation is the only
/// field written after creation, exactly once, by the cache's materialize
/// step.
#[derive(Debug)]
pub struct FileEntity {
    /// Lowercased, forward-slash form; the cache key.
    pub path_normalized: String,
    /// The path as supplied, used for reporting and handed to the engine.
    pub path_original: String,
    pub content: String,
    pub kind: FileKind,
    /// blake3 fingerprint of `content`; fast path for equality checks.
    fingerprint: blake3::Hash,
    parsed: OnceLock<ParsedSource>,
}

impl FileEntity {
    /// Build an entity from a path and its raw content.
    ///
    /// The kind is derived from the extension: `json` and `toml` files are
    /// configuration, everything else is source.
    pub fn from_content(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();

        let kind = match extension_lowercase(&path).as_deref() {
            Some("json") | Some("toml") => FileKind::Config,
            _ => FileKind::Source,
        };

        Self {
            path_normalized: normalize_path(&path),
            path_original: path,
            fingerprint: blake3::hash(content.as_bytes()),
            content,
            kind,
            parsed: OnceLock::new(),
        }
    }

    /// Entity equality: original path and full content.
    ///
    /// Deliberately *not* the normalised path (a moved file with identical
    /// content and name is not equal) and *not* the parsed representation
    /// (equality is what decides whether the parsed form may be reused).
    pub fn is_equal(&self, other: &FileEntity) -> bool {
        self.path_original == other.path_original && self.fingerprint == other.fingerprint
    }

    pub fn parsed(&self) -> Option<&ParsedSource> {
        self.parsed.get()
    }

    /// Attach the parsed representation. Written at most once; a second call
    /// is a defect in the materialize step and is ignored.
    pub(crate) fn set_parsed(&self, parsed: ParsedSource) {
        debug_assert!(
            self.kind == FileKind::Source,
            "materialize invoked for a Config entity"
        );
        let _ = self.parsed.set(parsed);
    }
}

/// Classify a (previous, current) entity pair into one of the five change
/// states. Pure and total; repeated calls always yield the same result.
///
/// Priority order matters:
/// 1. both absent        -> NotFound
/// 2. only current       -> New
/// 3. only previous      -> Deleted
/// 4. both, equal        -> Equal
/// 5. both, not equal    -> Modified
pub fn classify(previous: Option<&FileEntity>, current: Option<&FileEntity>) -> ChangeState {
    match (previous, current) {
        (None, None) => ChangeState::NotFound,
        (None, Some(_)) => ChangeState::New,
        (Some(_), None) => ChangeState::Deleted,
        (Some(prev), Some(cur)) => {
            if prev.is_equal(cur) {
                ChangeState::Equal
            } else {
                ChangeState::Modified
            }
        }
    }
}

/// Derived view over one path across two generations. Never stored.
#[derive(Debug)]
pub struct FileChange {
    pub previous: Option<std::sync::Arc<FileEntity>>,
    pub current: Option<std::sync::Arc<FileEntity>>,
    pub state: ChangeState,
}
