//! Document tree types for parsed Markdown.
//!
//! Every node carries a 1-indexed source line range so that violations can
//! point at the exact location in the original file.

/// Inclusive range of source lines (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Single-line span.
    pub fn line(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

/// Root of a parsed Markdown document.
///
/// Owns both the raw source lines and the block tree built from them.
/// Immutable once parsed; created per lint invocation.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub lines: Vec<String>,
    pub blocks: Vec<Block>,
    /// Whether the source text ended with a newline character.
    pub ends_with_newline: bool,
}

impl Document {
    /// Returns the raw source line (1-indexed), or `None` past end-of-file.
    pub fn line(&self, number: usize) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.lines.get(number - 1).map(|s| s.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the top-level blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns an iterator over all blocks recursively, including blocks
    /// nested inside list items.
    pub fn all_blocks(&self) -> AllBlocks<'_> {
        AllBlocks::new(&self.blocks)
    }

    /// Returns all headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.all_blocks().filter_map(|b| match b {
            Block::Heading(h) => Some(h),
            _ => None,
        })
    }

    /// Line ranges covered by code blocks (fences included).
    pub fn code_block_spans(&self) -> Vec<Span> {
        self.all_blocks()
            .filter_map(|b| match b {
                Block::CodeBlock(c) => Some(c.span),
                _ => None,
            })
            .collect()
    }

    /// Line ranges covered by tables.
    pub fn table_spans(&self) -> Vec<Span> {
        self.all_blocks()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t.span),
                _ => None,
            })
            .collect()
    }
}

/// Returns true when any of the spans contains the given line.
pub fn spans_contain(spans: &[Span], line: usize) -> bool {
    spans.iter().any(|s| s.contains(line))
}

/// A block-level element.
#[derive(Debug, Clone)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    CodeBlock(CodeBlock),
    Table(Table),
    ThematicBreak(Span),
    BlankLines(Span),
    Html(HtmlBlock),
}

impl Block {
    pub fn span(&self) -> Span {
        match self {
            Block::Heading(h) => h.span,
            Block::Paragraph(p) => p.span,
            Block::List(l) => l.span,
            Block::CodeBlock(c) => c.span,
            Block::Table(t) => t.span,
            Block::ThematicBreak(s) => *s,
            Block::BlankLines(s) => *s,
            Block::Html(h) => h.span,
        }
    }
}

/// How a heading was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `# Heading`
    Atx,
    /// `# Heading #`
    AtxClosed,
    /// Text underlined with `===` or `---`
    Setext,
}

impl HeadingStyle {
    /// Name used in configuration values and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingStyle::Atx => "atx",
            HeadingStyle::AtxClosed => "atx_closed",
            HeadingStyle::Setext => "setext",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Heading {
    pub level: u8,
    pub style: HeadingStyle,
    /// Heading content with markers stripped.
    pub text: String,
    pub inlines: Vec<Inline>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// Marker character of an unordered list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlMarker {
    Asterisk,
    Plus,
    Dash,
}

impl UlMarker {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '*' => Some(UlMarker::Asterisk),
            '+' => Some(UlMarker::Plus),
            '-' => Some(UlMarker::Dash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UlMarker::Asterisk => "asterisk",
            UlMarker::Plus => "plus",
            UlMarker::Dash => "dash",
        }
    }
}

/// Marker of a list item: an unordered bullet or an ordered ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Unordered(UlMarker),
    Ordered(u64),
}

#[derive(Debug, Clone)]
pub struct List {
    pub kind: ListKind,
    pub items: Vec<ListItem>,
    /// Number of ancestor lists this list is nested inside (0 at top level).
    pub nesting: usize,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ListItem {
    pub marker: ListMarker,
    /// Line of the marker (1-indexed).
    pub line: usize,
    /// Column of the marker character (1-indexed).
    pub marker_column: usize,
    /// Nested content, including nested lists.
    pub blocks: Vec<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backtick,
    Tilde,
    Indented,
}

#[derive(Debug, Clone)]
pub struct CodeBlock {
    pub fence: FenceKind,
    /// Info string after the opening fence (language tag), if any.
    pub info: Option<String>,
    /// False when the fence ran to end-of-document without a closer.
    pub fence_closed: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct HtmlBlock {
    /// Lowercased element name of the opening tag, when recognizable.
    pub element: Option<String>,
    pub span: Span,
}

/// An inline element within a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub kind: InlineKind,
    /// Source line (1-indexed).
    pub line: usize,
    /// Half-open column range within the line (1-indexed).
    pub columns: (usize, usize),
    /// Content with delimiters stripped. For `Html` this is the lowercased
    /// element name.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    Text,
    Emphasis,
    Strong,
    Code,
    Link,
    Html,
}

/// Iterator over all blocks in a document (recursively through list items).
pub struct AllBlocks<'a> {
    stack: Vec<std::slice::Iter<'a, Block>>,
}

impl<'a> AllBlocks<'a> {
    fn new(blocks: &'a [Block]) -> Self {
        Self {
            stack: vec![blocks.iter()],
        }
    }
}

impl<'a> Iterator for AllBlocks<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            if let Some(block) = iter.next() {
                if let Block::List(list) = block {
                    // Push item contents in reverse so the first item's
                    // blocks are yielded first.
                    for item in list.items.iter().rev() {
                        self.stack.push(item.blocks.iter());
                    }
                }
                return Some(block);
            }
            self.stack.pop();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str, line: usize) -> Block {
        Block::Heading(Heading {
            level,
            style: HeadingStyle::Atx,
            text: text.to_string(),
            inlines: vec![],
            span: Span::line(line),
        })
    }

    #[test]
    fn test_all_blocks_descends_into_list_items() {
        let doc = Document {
            lines: vec![],
            blocks: vec![
                heading(1, "Title", 1),
                Block::List(List {
                    kind: ListKind::Unordered,
                    nesting: 0,
                    span: Span::new(3, 6),
                    items: vec![
                        ListItem {
                            marker: ListMarker::Unordered(UlMarker::Dash),
                            line: 3,
                            marker_column: 1,
                            span: Span::new(3, 4),
                            blocks: vec![Block::List(List {
                                kind: ListKind::Unordered,
                                nesting: 1,
                                span: Span::line(4),
                                items: vec![],
                            })],
                        },
                        ListItem {
                            marker: ListMarker::Unordered(UlMarker::Dash),
                            line: 5,
                            marker_column: 1,
                            span: Span::new(5, 6),
                            blocks: vec![heading(2, "Inner", 6)],
                        },
                    ],
                }),
            ],
            ends_with_newline: true,
        };

        let starts: Vec<usize> = doc.all_blocks().map(|b| b.span().start).collect();
        assert_eq!(starts, vec![1, 3, 4, 6]);

        let headings: Vec<&str> = doc.headings().map(|h| h.text.as_str()).collect();
        assert_eq!(headings, vec!["Title", "Inner"]);
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(3, 5);
        assert!(!span.contains(2));
        assert!(span.contains(3));
        assert!(span.contains(5));
        assert!(!span.contains(6));
    }

    #[test]
    fn test_document_line_access() {
        let doc = Document {
            lines: vec!["first".to_string(), "second".to_string()],
            blocks: vec![],
            ends_with_newline: true,
        };
        assert_eq!(doc.line(1), Some("first"));
        assert_eq!(doc.line(2), Some("second"));
        assert_eq!(doc.line(0), None);
        assert_eq!(doc.line(3), None);
    }
}
