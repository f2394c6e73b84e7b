//! Infrastructure layer - the host boundary and cross-cutting utilities.
//!
//! This module contains code that interfaces with the hosting editor:
//! - Host traits (documents, styles, configuration, language switching)
//! - An in-memory host
//! - Error types and the failure policy table
//! - Logging setup

pub mod error;
pub mod host;
pub mod logging;
pub mod memory_host;
