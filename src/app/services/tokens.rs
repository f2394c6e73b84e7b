//! Inline token extraction.
//!
//! Every kind is scanned independently over the whole text with its own
//! `find_iter` cursor, so a scan holds no state between calls. Patterns avoid
//! lookaround: exact-count priority markers are found by taking maximal `!`
//! runs and keeping runs of length 1 to 3.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use super::proximity::{parse_iso_date, proximity};
use super::text_ops::TextIndex;
use crate::app::domain::{Token, TokenKind};

/// `#tag` candidates. Only those at text start or after whitespace count,
/// which is checked against the preceding char since `\s` here is ASCII-only.
static PROJECT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[A-Za-z][A-Za-z0-9_-]*").unwrap());

static BANG_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!+").unwrap());

static TIME_ESTIMATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\best:[0-9]+(?:\.[0-9]+)?[hm]\b").unwrap());

static IN_PROGRESS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[/\]").unwrap());

/// Group 1 is the inner date.
static DUE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]{4}-[0-9]{2}-[0-9]{2})\]").unwrap());

/// All tokens in `text`, ordered by start offset. Due dates are bucketed against `today`.
pub fn extract_tokens(text: &str, today: NaiveDate) -> Vec<Token> {
    extract_indexed(&TextIndex::new(text), today)
}

/// Tokens of a single kind, in left-to-right order.
pub fn extract_kind(text: &str, kind: TokenKind, today: NaiveDate) -> Vec<Token> {
    let index = TextIndex::new(text);
    let mut out = Vec::new();
    scan_kind(&index, kind, today, &mut out);
    out
}

pub fn extract_indexed(index: &TextIndex<'_>, today: NaiveDate) -> Vec<Token> {
    let mut out = Vec::new();
    scan_priorities(index, |_| true, &mut out);
    for kind in [
        TokenKind::ProjectTag,
        TokenKind::TimeEstimate,
        TokenKind::InProgressMarker,
        TokenKind::DueDate,
    ] {
        scan_kind(index, kind, today, &mut out);
    }
    out.sort_by_key(|token| token.span.start);
    out
}

fn scan_kind(index: &TextIndex<'_>, kind: TokenKind, today: NaiveDate, out: &mut Vec<Token>) {
    let text = index.text();
    match kind {
        TokenKind::ProjectTag => {
            for tag in PROJECT_TAG_RE.find_iter(text) {
                let detached = text[..tag.start()]
                    .chars()
                    .next_back()
                    .is_none_or(char::is_whitespace);
                if detached {
                    out.push(Token::new(kind, index.span(tag.start(), tag.end())));
                }
            }
        }
        TokenKind::PriorityHigh | TokenKind::PriorityMed | TokenKind::PriorityLow => {
            scan_priorities(index, |found| found == kind, out);
        }
        TokenKind::TimeEstimate => push_matches(index, &TIME_ESTIMATE_RE, kind, out),
        TokenKind::InProgressMarker => push_matches(index, &IN_PROGRESS_RE, kind, out),
        TokenKind::DueDate => {
            for caps in DUE_DATE_RE.captures_iter(text) {
                let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let Some(due) = parse_iso_date(inner.as_str()) else {
                    tracing::trace!(date = inner.as_str(), "Skipping impossible due date");
                    continue;
                };
                let span = index.span(whole.start(), whole.end());
                out.push(Token::due(span, proximity(due, today)));
            }
        }
    }
}

/// One pass over maximal `!` runs; runs longer than three are no priority at all.
fn scan_priorities(
    index: &TextIndex<'_>,
    wanted: impl Fn(TokenKind) -> bool,
    out: &mut Vec<Token>,
) {
    for run in BANG_RUN_RE.find_iter(index.text()) {
        match TokenKind::priority_for_run(run.end() - run.start()) {
            Some(kind) if wanted(kind) => {
                out.push(Token::new(kind, index.span(run.start(), run.end())));
            }
            _ => {}
        }
    }
}

fn push_matches(index: &TextIndex<'_>, re: &Regex, kind: TokenKind, out: &mut Vec<Token>) {
    for m in re.find_iter(index.text()) {
        out.push(Token::new(kind, index.span(m.start(), m.end())));
    }
}
