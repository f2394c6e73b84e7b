use std::sync::LazyLock;

use regex_lite::Regex;

use crate::app::domain::DocumentKind;

/// Frontmatter always sits at the top; nothing past this many chars is inspected.
pub const FRONTMATTER_SCAN_CHARS: usize = 2048;

pub const PLANNER_EXTENSION: &str = ".md";

/// `---` line at the very start, body, closing `---` line. Group 1 is the body.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---\r?\n((?s:.*?))\r?\n---[ \t]*(?:\r?\n|\z)").unwrap()
});

static PLANNER_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^type:\s*hexfield-planner\s*$").unwrap());

pub fn is_eligible_file(file_name: &str) -> bool {
    file_name.ends_with(PLANNER_EXTENSION)
}

/// The leading window of `text` that detection looks at.
pub fn head(text: &str) -> &str {
    match text.char_indices().nth(FRONTMATTER_SCAN_CHARS) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Frontmatter body, if the text opens with a complete frontmatter block.
pub fn frontmatter_body(text: &str) -> Option<&str> {
    FRONTMATTER_RE
        .captures(head(text))
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

pub fn has_planner_frontmatter(text: &str) -> bool {
    frontmatter_body(text).is_some_and(|body| PLANNER_TYPE_RE.is_match(body))
}

/// What a document should be classified as, from its name and current text.
pub fn detect_kind(file_name: &str, text: &str) -> DocumentKind {
    if is_eligible_file(file_name) && has_planner_frontmatter(text) {
        DocumentKind::Specialized
    } else {
        DocumentKind::Generic
    }
}
