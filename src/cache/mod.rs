// src/cache/mod.rs

//! File/version cache and change detection.
//!
//! This module is responsible for:
//! - Representing one file at one point in time ([`FileEntity`]).
//! - Classifying how a file changed between two consecutive build
//!   generations ([`classify`], [`ChangeState`]).
//! - Reusing parsed representations for byte-identical files instead of
//!   reparsing them ([`IncrementalCache`]).
//!
//! It does **not** know about compile strategies or output channels; it only
//! answers "what is this file, and did it change?".

pub mod entity;
pub mod generation;
pub mod incremental;
pub mod path_utils;

pub use entity::{classify, ChangeState, FileChange, FileEntity, FileKind};
pub use generation::Generation;
pub use incremental::IncrementalCache;
pub use path_utils::normalize_path;
