use super::token::{ProximityBucket, Token, TokenKind};

/// Unit of style allocation: one per static token kind, one per due-date bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorClass {
    ProjectTag,
    PriorityHigh,
    PriorityMed,
    PriorityLow,
    TimeEstimate,
    InProgress,
    Due(ProximityBucket),
}

impl ColorClass {
    /// Every class, in the order handles are allocated and submitted.
    pub fn all() -> &'static [ColorClass] {
        &[
            Self::ProjectTag,
            Self::PriorityHigh,
            Self::PriorityMed,
            Self::PriorityLow,
            Self::TimeEstimate,
            Self::InProgress,
            Self::Due(ProximityBucket::Overdue),
            Self::Due(ProximityBucket::Today),
            Self::Due(ProximityBucket::Soon),
            Self::Due(ProximityBucket::Future),
        ]
    }

    /// Class a token is painted with. A due-date token without a bucket has no class.
    pub fn of(token: &Token) -> Option<ColorClass> {
        match token.kind {
            TokenKind::ProjectTag => Some(Self::ProjectTag),
            TokenKind::PriorityHigh => Some(Self::PriorityHigh),
            TokenKind::PriorityMed => Some(Self::PriorityMed),
            TokenKind::PriorityLow => Some(Self::PriorityLow),
            TokenKind::TimeEstimate => Some(Self::TimeEstimate),
            TokenKind::InProgressMarker => Some(Self::InProgress),
            TokenKind::DueDate => token.proximity.map(Self::Due),
        }
    }

    /// Configuration name, as used under `hexfield.colors.<name>`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProjectTag => "projectTag",
            Self::PriorityHigh => "priorityHigh",
            Self::PriorityMed => "priorityMed",
            Self::PriorityLow => "priorityLow",
            Self::TimeEstimate => "timeEstimate",
            Self::InProgress => "inProgress",
            Self::Due(ProximityBucket::Overdue) => "overdue",
            Self::Due(ProximityBucket::Today) => "today",
            Self::Due(ProximityBucket::Soon) => "soon",
            Self::Due(ProximityBucket::Future) => "future",
        }
    }

    pub fn from_name(name: &str) -> Option<ColorClass> {
        Self::all().iter().copied().find(|c| c.name() == name)
    }

    /// Chip-style classes get a translucent border and rounded corners.
    pub fn is_chip(&self) -> bool {
        matches!(self, Self::ProjectTag)
    }
}

/// What the host needs to allocate a style handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    pub color: String,
    pub border: Option<String>,
    pub border_radius: Option<String>,
}

impl StyleDescriptor {
    pub fn plain(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            border: None,
            border_radius: None,
        }
    }
}

/// Opaque host handle for an allocated style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleHandle(pub u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::document::ViewId;
    use crate::app::domain::token::Span;

    #[test]
    fn test_names_round_trip() {
        for class in ColorClass::all() {
            assert_eq!(ColorClass::from_name(class.name()), Some(*class));
        }
        assert_eq!(ColorClass::from_name("Overdue"), None);
        assert_eq!(ColorClass::from_name(""), None);
    }

    #[test]
    fn test_ten_distinct_classes() {
        let all = ColorClass::all();
        assert_eq!(all.len(), 10);
        let mut names: Vec<&str> = all.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_class_of_token() {
        let span = Span::new(0, 3);
        assert_eq!(
            ColorClass::of(&Token::new(TokenKind::PriorityHigh, span)),
            Some(ColorClass::PriorityHigh)
        );
        assert_eq!(
            ColorClass::of(&Token::due(span, ProximityBucket::Today)),
            Some(ColorClass::Due(ProximityBucket::Today))
        );
        assert_eq!(ColorClass::of(&Token::new(TokenKind::DueDate, span)), None);
    }

    #[test]
    fn test_only_project_tag_is_chip() {
        let chips: Vec<_> = ColorClass::all().iter().filter(|c| c.is_chip()).collect();
        assert_eq!(chips, vec![&ColorClass::ProjectTag]);
    }

    #[test]
    fn test_style_handles_key_ordered_maps() {
        use std::collections::BTreeMap;

        let mut applied = BTreeMap::new();
        applied.insert((ViewId(2), StyleHandle(7)), "b");
        applied.insert((ViewId(1), StyleHandle(9)), "a");
        applied.insert((ViewId(2), StyleHandle(3)), "c");
        let order: Vec<_> = applied.values().copied().collect();
        assert_eq!(order, vec!["a", "c", "b"]);
        assert!(StyleHandle(1) < StyleHandle(2));
    }
}
