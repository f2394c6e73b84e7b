use crate::app::domain::{Position, Span, TextRange};

/// Line table over one snapshot of a document's text.
///
/// Maps regex byte offsets to char offsets and char offsets to
/// zero-based `(line, column)` positions. `\n` terminates a line.
pub struct TextIndex<'a> {
    text: &'a str,
    /// `(byte, char)` offset of each line start.
    line_starts: Vec<(usize, usize)>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![(0, 0)];
        for (chars, (byte, ch)) in text.char_indices().enumerate() {
            if ch == '\n' {
                line_starts.push((byte + 1, chars + 1));
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Char offset of a byte offset lying on a char boundary.
    pub fn char_offset(&self, byte: usize) -> usize {
        let line = self.line_starts.partition_point(|(b, _)| *b <= byte) - 1;
        let (line_byte, line_char) = self.line_starts[line];
        line_char + self.text[line_byte..byte].chars().count()
    }

    pub fn span(&self, byte_start: usize, byte_end: usize) -> Span {
        Span::new(self.char_offset(byte_start), self.char_offset(byte_end))
    }

    pub fn position(&self, char_offset: usize) -> Position {
        let line = self.line_starts.partition_point(|(_, c)| *c <= char_offset) - 1;
        Position::new(line, char_offset - self.line_starts[line].1)
    }

    pub fn range(&self, span: Span) -> TextRange {
        TextRange::new(self.position(span.start), self.position(span.end))
    }
}
