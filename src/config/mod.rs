// src/config/mod.rs
// =============================================================================
// Target descriptors: the list of endpoints a run will check.
//
// The list is a plain value handed to the checker and the monitor loop,
// so every call works on exactly the targets it was given.
// =============================================================================

mod targets;

pub use targets::{default_targets, load_or_keep, Target};
