#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// An editor view showing one document. Several views may show the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

pub const MARKDOWN_LANGUAGE_ID: &str = "markdown";
pub const HEXFIELD_LANGUAGE_ID: &str = "hexfield-markdown";

/// Language a host has assigned to a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Markdown,
    HexfieldMarkdown,
    Other(String),
}

impl LanguageId {
    pub fn parse(id: &str) -> Self {
        match id {
            MARKDOWN_LANGUAGE_ID => Self::Markdown,
            HEXFIELD_LANGUAGE_ID => Self::HexfieldMarkdown,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Markdown => MARKDOWN_LANGUAGE_ID,
            Self::HexfieldMarkdown => HEXFIELD_LANGUAGE_ID,
            Self::Other(id) => id,
        }
    }

    /// Classification implied by the language, if it is one we manage.
    pub fn kind(&self) -> Option<DocumentKind> {
        match self {
            Self::Markdown => Some(DocumentKind::Generic),
            Self::HexfieldMarkdown => Some(DocumentKind::Specialized),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Generic,
    Specialized,
}

impl DocumentKind {
    pub fn language(&self) -> LanguageId {
        match self {
            Self::Generic => LanguageId::Markdown,
            Self::Specialized => LanguageId::HexfieldMarkdown,
        }
    }
}

/// Host-side metadata for an open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub file_name: String,
    pub language: LanguageId,
}

/// Zero-based line and char column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!(LanguageId::parse("markdown"), LanguageId::Markdown);
        assert_eq!(
            LanguageId::parse("hexfield-markdown"),
            LanguageId::HexfieldMarkdown
        );
        assert_eq!(
            LanguageId::parse("rust"),
            LanguageId::Other("rust".to_string())
        );
        assert_eq!(LanguageId::parse("rust").as_str(), "rust");
    }

    #[test]
    fn test_language_kind() {
        assert_eq!(LanguageId::Markdown.kind(), Some(DocumentKind::Generic));
        assert_eq!(
            LanguageId::HexfieldMarkdown.kind(),
            Some(DocumentKind::Specialized)
        );
        assert_eq!(LanguageId::Other("plaintext".into()).kind(), None);
        assert_eq!(
            DocumentKind::Specialized.language(),
            LanguageId::HexfieldMarkdown
        );
    }
}
