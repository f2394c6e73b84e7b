use std::collections::BTreeMap;

use crate::app::domain::{
    DocumentId, DocumentInfo, HexfieldSettings, LanguageId, StyleDescriptor, StyleHandle,
    TextRange, ViewId,
};

use super::error::HostError;
use super::host::{ConfigSource, DocumentSource, LanguageSwitcher, StyleSink};

struct MemoryDocument {
    file_name: String,
    language: LanguageId,
    text: String,
}

/// A self-contained host: documents and views in maps, styles and ranges recorded.
///
/// Used by the command-line binary and by every controller test.
pub struct MemoryHost {
    documents: BTreeMap<DocumentId, MemoryDocument>,
    views: BTreeMap<ViewId, DocumentId>,
    styles: BTreeMap<StyleHandle, StyleDescriptor>,
    decorations: BTreeMap<(ViewId, StyleHandle), Vec<TextRange>>,
    next_id: u64,
    pub settings: HexfieldSettings,
    /// Number of `set_decorations` calls accepted so far.
    pub submissions: usize,
    /// Every successful language change, in order.
    pub language_changes: Vec<(DocumentId, LanguageId)>,
    /// Released handles, in order.
    pub released: Vec<StyleHandle>,
    /// When set, `set_document_language` fails for live documents.
    pub reject_language_changes: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::with_settings(HexfieldSettings::default())
    }

    pub fn with_settings(settings: HexfieldSettings) -> Self {
        Self {
            documents: BTreeMap::new(),
            views: BTreeMap::new(),
            styles: BTreeMap::new(),
            decorations: BTreeMap::new(),
            next_id: 1,
            settings,
            submissions: 0,
            language_changes: Vec::new(),
            released: Vec::new(),
            reject_language_changes: false,
        }
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn open_document(&mut self, file_name: &str, language: &str, text: &str) -> DocumentId {
        let id = DocumentId(self.next());
        self.documents.insert(
            id,
            MemoryDocument {
                file_name: file_name.to_string(),
                language: LanguageId::parse(language),
                text: text.to_string(),
            },
        );
        id
    }

    /// Replace a document's whole text. Returns false if it is closed.
    pub fn edit(&mut self, doc: DocumentId, text: &str) -> bool {
        match self.documents.get_mut(&doc) {
            Some(d) => {
                d.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Close a document and every view showing it.
    pub fn close_document(&mut self, doc: DocumentId) {
        self.documents.remove(&doc);
        let closed: Vec<ViewId> = self
            .views
            .iter()
            .filter(|(_, d)| **d == doc)
            .map(|(v, _)| *v)
            .collect();
        for view in closed {
            self.close_view(view);
        }
    }

    pub fn open_view(&mut self, doc: DocumentId) -> ViewId {
        let id = ViewId(self.next());
        self.views.insert(id, doc);
        id
    }

    pub fn close_view(&mut self, view: ViewId) {
        self.views.remove(&view);
        self.decorations.retain(|(v, _), _| *v != view);
    }

    pub fn language(&self, doc: DocumentId) -> Option<&LanguageId> {
        self.documents.get(&doc).map(|d| &d.language)
    }

    pub fn live_styles(&self) -> usize {
        self.styles.len()
    }

    pub fn style(&self, handle: StyleHandle) -> Option<&StyleDescriptor> {
        self.styles.get(&handle)
    }

    /// Ranges currently applied on a view under one handle.
    pub fn ranges(&self, view: ViewId, handle: StyleHandle) -> &[TextRange] {
        self.decorations
            .get(&(view, handle))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty decorations on a view, as `(style, ranges)` in handle order.
    pub fn decorations_for(&self, view: ViewId) -> Vec<(&StyleDescriptor, &[TextRange])> {
        self.decorations
            .iter()
            .filter(|((v, _), ranges)| *v == view && !ranges.is_empty())
            .filter_map(|((_, handle), ranges)| {
                self.styles.get(handle).map(|style| (style, ranges.as_slice()))
            })
            .collect()
    }

    /// Ranges on a view painted with the given color, across all styles.
    pub fn ranges_with_color(&self, view: ViewId, color: &str) -> Vec<TextRange> {
        let mut ranges: Vec<TextRange> = self
            .decorations_for(view)
            .into_iter()
            .filter(|(style, _)| style.color == color)
            .flat_map(|(_, ranges)| ranges.iter().copied())
            .collect();
        ranges.sort();
        ranges
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for MemoryHost {
    fn document_info(&self, doc: DocumentId) -> Result<DocumentInfo, HostError> {
        self.documents
            .get(&doc)
            .map(|d| DocumentInfo {
                file_name: d.file_name.clone(),
                language: d.language.clone(),
            })
            .ok_or(HostError::DocumentClosed(doc))
    }

    fn document_text(&self, doc: DocumentId) -> Result<String, HostError> {
        self.documents
            .get(&doc)
            .map(|d| d.text.clone())
            .ok_or(HostError::DocumentClosed(doc))
    }

    fn open_documents(&self) -> Vec<DocumentId> {
        self.documents.keys().copied().collect()
    }

    fn view_document(&self, view: ViewId) -> Result<DocumentId, HostError> {
        self.views
            .get(&view)
            .copied()
            .ok_or(HostError::ViewDetached(view))
    }

    fn visible_views(&self) -> Vec<ViewId> {
        self.views.keys().copied().collect()
    }
}

impl StyleSink for MemoryHost {
    fn create_style(&mut self, style: &StyleDescriptor) -> StyleHandle {
        let handle = StyleHandle(self.next());
        self.styles.insert(handle, style.clone());
        handle
    }

    fn release_style(&mut self, handle: StyleHandle) {
        if self.styles.remove(&handle).is_some() {
            self.released.push(handle);
        }
        self.decorations.retain(|(_, h), _| *h != handle);
    }

    fn set_decorations(
        &mut self,
        view: ViewId,
        handle: StyleHandle,
        ranges: &[TextRange],
    ) -> Result<(), HostError> {
        if !self.views.contains_key(&view) {
            return Err(HostError::ViewDetached(view));
        }
        if !self.styles.contains_key(&handle) {
            return Err(HostError::Rejected(format!("unknown style {handle:?}")));
        }
        self.submissions += 1;
        if ranges.is_empty() {
            self.decorations.remove(&(view, handle));
        } else {
            self.decorations.insert((view, handle), ranges.to_vec());
        }
        Ok(())
    }
}

impl ConfigSource for MemoryHost {
    fn get_string(&self, key: &str) -> Option<String> {
        self.settings.get_string(key)
    }
}

impl LanguageSwitcher for MemoryHost {
    fn set_document_language(
        &mut self,
        doc: DocumentId,
        language: &LanguageId,
    ) -> Result<(), HostError> {
        let reject = self.reject_language_changes;
        let document = self
            .documents
            .get_mut(&doc)
            .ok_or(HostError::DocumentClosed(doc))?;
        if reject {
            return Err(HostError::Rejected("language change refused".to_string()));
        }
        document.language = language.clone();
        self.language_changes.push((doc, language.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::Position;

    fn range(a: usize, b: usize) -> TextRange {
        TextRange::new(Position::new(0, a), Position::new(0, b))
    }

    #[test]
    fn test_documents_and_views() {
        let mut host = MemoryHost::new();
        let doc = host.open_document("plan.md", "markdown", "hello");
        let view = host.open_view(doc);

        assert_eq!(host.document_text(doc).unwrap(), "hello");
        assert_eq!(host.view_document(view).unwrap(), doc);
        assert_eq!(host.views_of(doc), vec![view]);

        assert!(host.edit(doc, "bye"));
        assert_eq!(host.document_text(doc).unwrap(), "bye");

        host.close_document(doc);
        assert_eq!(host.document_text(doc), Err(HostError::DocumentClosed(doc)));
        assert_eq!(host.view_document(view), Err(HostError::ViewDetached(view)));
        assert!(!host.edit(doc, "again"));
    }

    #[test]
    fn test_set_and_clear_decorations() {
        let mut host = MemoryHost::new();
        let doc = host.open_document("a.md", "markdown", "");
        let view = host.open_view(doc);
        let handle = host.create_style(&StyleDescriptor::plain("#FFFFFF"));

        host.set_decorations(view, handle, &[range(0, 2)]).unwrap();
        assert_eq!(host.ranges_with_color(view, "#FFFFFF"), vec![range(0, 2)]);

        host.set_decorations(view, handle, &[]).unwrap();
        assert!(host.decorations_for(view).is_empty());
        assert_eq!(host.submissions, 2);
    }

    #[test]
    fn test_release_style_clears_its_ranges() {
        let mut host = MemoryHost::new();
        let doc = host.open_document("a.md", "markdown", "");
        let view = host.open_view(doc);
        let handle = host.create_style(&StyleDescriptor::plain("#000000"));
        host.set_decorations(view, handle, &[range(1, 3)]).unwrap();

        host.release_style(handle);
        assert_eq!(host.live_styles(), 0);
        assert_eq!(host.released, vec![handle]);
        assert!(host.decorations_for(view).is_empty());
        assert!(matches!(
            host.set_decorations(view, handle, &[]),
            Err(HostError::Rejected(_))
        ));
    }

    #[test]
    fn test_language_switch_failures() {
        let mut host = MemoryHost::new();
        let doc = host.open_document("a.md", "markdown", "");

        host.reject_language_changes = true;
        assert!(matches!(
            host.set_document_language(doc, &LanguageId::HexfieldMarkdown),
            Err(HostError::Rejected(_))
        ));
        assert_eq!(host.language(doc), Some(&LanguageId::Markdown));

        host.close_document(doc);
        assert_eq!(
            host.set_document_language(doc, &LanguageId::HexfieldMarkdown),
            Err(HostError::DocumentClosed(doc))
        );
        assert!(host.language_changes.is_empty());
    }
}
