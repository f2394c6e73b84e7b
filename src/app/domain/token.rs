use std::ops::Range;

/// The closed set of inline token shapes recognised in a hexfield document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    ProjectTag,
    PriorityHigh,
    PriorityMed,
    PriorityLow,
    TimeEstimate,
    InProgressMarker,
    DueDate,
}

impl TokenKind {
    pub fn all() -> &'static [TokenKind] {
        &[
            Self::ProjectTag,
            Self::PriorityHigh,
            Self::PriorityMed,
            Self::PriorityLow,
            Self::TimeEstimate,
            Self::InProgressMarker,
            Self::DueDate,
        ]
    }

    /// Priority kind for an exclamation run of exactly `len` marks.
    pub fn priority_for_run(len: usize) -> Option<TokenKind> {
        match len {
            1 => Some(Self::PriorityLow),
            2 => Some(Self::PriorityMed),
            3 => Some(Self::PriorityHigh),
            _ => None,
        }
    }
}

/// How close a due date is to the current calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProximityBucket {
    Overdue,
    Today,
    Soon,
    Future,
}

impl ProximityBucket {
    pub fn all() -> &'static [ProximityBucket] {
        &[Self::Overdue, Self::Today, Self::Soon, Self::Future]
    }
}

/// Half-open `[start, end)` range in char offsets. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "token spans are never empty");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Present only for `TokenKind::DueDate`.
    pub proximity: Option<ProximityBucket>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            proximity: None,
        }
    }

    pub fn due(span: Span, bucket: ProximityBucket) -> Self {
        Self {
            kind: TokenKind::DueDate,
            span,
            proximity: Some(bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_for_run() {
        assert_eq!(TokenKind::priority_for_run(0), None);
        assert_eq!(TokenKind::priority_for_run(1), Some(TokenKind::PriorityLow));
        assert_eq!(TokenKind::priority_for_run(2), Some(TokenKind::PriorityMed));
        assert_eq!(TokenKind::priority_for_run(3), Some(TokenKind::PriorityHigh));
        assert_eq!(TokenKind::priority_for_run(4), None);
        assert_eq!(TokenKind::priority_for_run(12), None);
    }

    #[test]
    fn test_span_overlap() {
        let a = Span::new(0, 4);
        let b = Span::new(4, 6);
        let c = Span::new(3, 5);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert_eq!(a.len(), 4);
        assert_eq!(b.as_range(), 4..6);
    }

    #[test]
    fn test_due_token_carries_bucket() {
        let token = Token::due(Span::new(0, 12), ProximityBucket::Soon);
        assert_eq!(token.kind, TokenKind::DueDate);
        assert_eq!(token.proximity, Some(ProximityBucket::Soon));

        let tag = Token::new(TokenKind::ProjectTag, Span::new(0, 5));
        assert_eq!(tag.proximity, None);
    }
}
