//! Token coloring and document-kind classification for hexfield-markdown planners.
//!
//! A host editor feeds [`Event`]s to a [`HexfieldState`] and implements the
//! [`Host`] traits; the crate decides which documents are planners and which
//! ranges get which color.

pub mod app;

pub use app::{
    Calendar, ColorClass, DocumentId, Event, FixedCalendar, HexfieldSettings, HexfieldState, Host,
    MemoryHost, SystemCalendar, Token, TokenKind, ViewId,
};
