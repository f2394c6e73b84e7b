//! Controllers layer - stateful orchestration.
//!
//! - Decoration engine (style epochs, scan and apply)
//! - Reactivity (immediate vs. debounced re-scans)
//! - Document kind classification (promote/demote)

pub mod classification;
pub mod decoration;
pub mod reactivity;
