//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Tokens, spans and proximity buckets
//! - Color classes and style descriptors
//! - Document/view identities and languages
//! - Settings
//! - Event types for the dispatch loop

pub mod color_class;
pub mod document;
pub mod messages;
pub mod settings;
pub mod token;

pub use color_class::{ColorClass, StyleDescriptor, StyleHandle};
pub use document::{
    DocumentId, DocumentInfo, DocumentKind, LanguageId, Position, TextRange, ViewId,
};
pub use messages::Event;
pub use settings::HexfieldSettings;
pub use token::{ProximityBucket, Span, Token, TokenKind};
