//! The boundary to the editor hosting hexfield.
//!
//! The host owns documents, views, rendering and configuration storage. Nothing
//! here is called concurrently: every method runs on the event-processing thread.

use crate::app::domain::{
    DocumentId, DocumentInfo, LanguageId, StyleDescriptor, StyleHandle, TextRange, ViewId,
};

use super::error::HostError;

/// Read access to open documents and the views showing them.
pub trait DocumentSource {
    fn document_info(&self, doc: DocumentId) -> Result<DocumentInfo, HostError>;

    fn document_text(&self, doc: DocumentId) -> Result<String, HostError>;

    fn open_documents(&self) -> Vec<DocumentId>;

    fn view_document(&self, view: ViewId) -> Result<DocumentId, HostError>;

    fn visible_views(&self) -> Vec<ViewId>;

    fn views_of(&self, doc: DocumentId) -> Vec<ViewId> {
        self.visible_views()
            .into_iter()
            .filter(|view| self.view_document(*view).ok() == Some(doc))
            .collect()
    }
}

/// Style allocation and range application.
pub trait StyleSink {
    fn create_style(&mut self, style: &StyleDescriptor) -> StyleHandle;

    /// Releasing a handle also removes every range displayed with it.
    fn release_style(&mut self, handle: StyleHandle);

    /// Replace the ranges shown for `handle` on `view`. An empty slice clears them.
    fn set_decorations(
        &mut self,
        view: ViewId,
        handle: StyleHandle,
        ranges: &[TextRange],
    ) -> Result<(), HostError>;
}

pub trait ConfigSource {
    fn get_string(&self, key: &str) -> Option<String>;

    /// Value for `key`, or `default` when absent or empty.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get_string(key)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }
}

pub trait LanguageSwitcher {
    /// May fail when the document closed in the meantime.
    fn set_document_language(
        &mut self,
        doc: DocumentId,
        language: &LanguageId,
    ) -> Result<(), HostError>;
}

/// Everything the coordinator needs from the editor.
pub trait Host: DocumentSource + StyleSink + ConfigSource + LanguageSwitcher {}

impl<T> Host for T where T: DocumentSource + StyleSink + ConfigSource + LanguageSwitcher {}
