//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Token, ColorClass, Document identities, Settings, Event)
//! - `services/` - Pure operations (token extraction, proximity, colors, frontmatter, text positions)
//! - `controllers/` - Orchestration (DecorationEngine, ReactivityController, DocumentKindClassifier)
//! - `infrastructure/` - Host boundary (host traits, in-memory host, error, logging)
//! - `state.rs` - Main coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{ColorClass, DocumentId, DocumentKind, Event, HexfieldSettings, LanguageId, Token, TokenKind, ViewId};
pub use infrastructure::error::{HexfieldError, HostError, Result};
pub use infrastructure::host::Host;
pub use infrastructure::memory_host::MemoryHost;
pub use services::proximity::{Calendar, FixedCalendar, SystemCalendar};
pub use state::HexfieldState;
