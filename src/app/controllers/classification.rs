use crate::app::domain::{DocumentId, DocumentKind};
use crate::app::infrastructure::error::absorb;
use crate::app::infrastructure::host::{DocumentSource, LanguageSwitcher};
use crate::app::services::frontmatter::detect_kind;

/// Why a document is being (re)classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    Opened,
    Changed,
    Activated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Promoted,
    Demoted,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Kind after evaluation; `None` for closed documents and unmanaged languages.
    pub kind: Option<DocumentKind>,
    pub transition: Transition,
}

impl Evaluation {
    fn unchanged(kind: Option<DocumentKind>) -> Self {
        Self {
            kind,
            transition: Transition::Unchanged,
        }
    }

    pub fn is_specialized(&self) -> bool {
        self.kind == Some(DocumentKind::Specialized)
    }
}

/// Target kind, if `current` should change given what the content says.
///
/// Every trigger may promote. Only a content change demotes: a document that
/// was promoted stays put on open/activate until an edit removes the marker.
pub fn next_kind(current: DocumentKind, detected: DocumentKind, trigger: Trigger) -> Option<DocumentKind> {
    match (current, detected) {
        (DocumentKind::Generic, DocumentKind::Specialized) => Some(DocumentKind::Specialized),
        (DocumentKind::Specialized, DocumentKind::Generic) if trigger == Trigger::Changed => {
            Some(DocumentKind::Generic)
        }
        _ => None,
    }
}

/// Promotes `markdown` documents to `hexfield-markdown` and back, based on frontmatter.
///
/// The host's language id is the state; nothing is cached here.
#[derive(Debug, Default)]
pub struct DocumentKindClassifier;

impl DocumentKindClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate<H: DocumentSource + LanguageSwitcher>(
        &self,
        host: &mut H,
        doc: DocumentId,
        trigger: Trigger,
    ) -> Evaluation {
        let Some(info) = absorb(host.document_info(doc), "classify") else {
            return Evaluation::unchanged(None);
        };
        let Some(current) = info.language.kind() else {
            return Evaluation::unchanged(None);
        };
        let Some(text) = absorb(host.document_text(doc), "classify") else {
            return Evaluation::unchanged(None);
        };

        let detected = detect_kind(&info.file_name, &text);
        let Some(target) = next_kind(current, detected, trigger) else {
            return Evaluation::unchanged(Some(current));
        };

        let switched = absorb(
            host.set_document_language(doc, &target.language()),
            "change document language",
        );
        if switched.is_none() {
            return Evaluation::unchanged(Some(current));
        }

        let transition = match target {
            DocumentKind::Specialized => Transition::Promoted,
            DocumentKind::Generic => Transition::Demoted,
        };
        tracing::info!(doc = ?doc, file = %info.file_name, ?trigger, ?transition, "Document reclassified");
        Evaluation {
            kind: Some(target),
            transition,
        }
    }
}
