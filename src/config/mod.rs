// src/config/mod.rs

//! Compiler option loading and validation.
//!
//! Settings arrive as a flat, all-optional [`RawSettings`] (deserialized from
//! TOML or built in code), are validated exactly once, and become the
//! immutable [`Options`] struct the cache and the strategies read for the
//! rest of their lifetime. Translation of these options into the opaque
//! engine's native format is the engine adapter's job, not ours.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{Options, RawSettings};
