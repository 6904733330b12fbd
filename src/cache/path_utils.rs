// src/cache/path_utils.rs

//! Path normalisation helpers for the cache.

use std::path::Path;

/// Normalise a path into the form used as the cache key.
///
/// - Backslashes become forward slashes, so Windows and Unix spellings of the
///   same path collide on one key.
/// - The result is lowercased, matching case-insensitive filesystems.
///
/// The original spelling of the path is kept separately on the entity; the
/// normalised form is *only* a lookup key and must never be handed to the
/// engine or reported to users.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

/// Extract the lowercase extension of a path, without the leading dot.
pub fn extension_lowercase(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
