//! Services layer - pure operations with no host or lifecycle state.
//!
//! - Due-date proximity
//! - Token extraction
//! - Color resolution
//! - Frontmatter detection
//! - Text offset indexing

pub mod colors;
pub mod frontmatter;
pub mod proximity;
pub mod text_ops;
pub mod tokens;
