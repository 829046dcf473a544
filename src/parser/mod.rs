//! Markdown block parser.
//!
//! Line-oriented, single-pass, with a nesting-aware list builder. Parsing
//! never fails: Markdown has no strict grammar, so malformed constructs
//! resolve to a best-effort block boundary (an unterminated code fence
//! extends to end-of-document) and are left for rules to report on.

pub mod ast;
pub mod inline;

use ast::{
    Block, CodeBlock, Document, FenceKind, Heading, HeadingStyle, HtmlBlock, Inline, List,
    ListItem, ListKind, ListMarker, Paragraph, Span, Table, UlMarker,
};
use inline::scan_inlines;
use std::fs;
use std::path::Path;

/// Parse a Markdown file from disk.
///
/// I/O is the only failure mode; the Markdown itself always parses.
pub fn parse_file(path: &Path) -> std::io::Result<Document> {
    let content = fs::read_to_string(path)?;
    Ok(parse_document(&content))
}

/// Parse Markdown from a string. Never fails.
pub fn parse_document(source: &str) -> Document {
    let lines: Vec<String> = source.lines().map(|s| s.to_string()).collect();
    let blocks = {
        let cursors: Vec<Cursor> = lines
            .iter()
            .enumerate()
            .map(|(idx, text)| Cursor {
                number: idx + 1,
                column: 1,
                text,
            })
            .collect();
        parse_blocks(&cursors, 0)
    };
    Document {
        lines,
        blocks,
        ends_with_newline: source.ends_with('\n'),
    }
}

/// A view of one source line within the current nesting frame.
///
/// `column` is the 1-indexed column of `text[0]` in the original line, so
/// positions survive the indentation stripping done for list item content.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    number: usize,
    column: usize,
    text: &'a str,
}

impl<'a> Cursor<'a> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Leading space count. Tabs are left alone here; MD010 reports them.
    fn indent(&self) -> usize {
        self.text.chars().take_while(|&c| c == ' ').count()
    }

    /// Removes up to `n` leading spaces, adjusting the column.
    fn stripped(&self, n: usize) -> Cursor<'a> {
        let removed = self.indent().min(n);
        Cursor {
            number: self.number,
            column: self.column + removed,
            text: &self.text[removed..],
        }
    }
}

fn parse_blocks(lines: &[Cursor], nesting: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let cur = lines[i];

        if cur.is_blank() {
            let start = cur.number;
            while i < lines.len() && lines[i].is_blank() {
                i += 1;
            }
            blocks.push(Block::BlankLines(Span::new(start, lines[i - 1].number)));
            continue;
        }

        let indent = cur.indent();

        if indent >= 4 {
            blocks.push(parse_indented_code(lines, &mut i));
            continue;
        }

        let trimmed = &cur.text[indent..];

        if let Some((fence_char, fence_len, info)) = fence_open(trimmed) {
            blocks.push(parse_fenced_code(lines, &mut i, fence_char, fence_len, info));
            continue;
        }

        if let Some(heading) = parse_atx_heading(cur, indent) {
            blocks.push(Block::Heading(heading));
            i += 1;
            continue;
        }

        if is_thematic_break(trimmed) {
            blocks.push(Block::ThematicBreak(Span::line(cur.number)));
            i += 1;
            continue;
        }

        if item_start(cur).is_some() {
            blocks.push(parse_list(lines, &mut i, nesting));
            continue;
        }

        if is_table_start(lines, i) {
            blocks.push(parse_table(lines, &mut i));
            continue;
        }

        if is_html_block_start(trimmed) {
            blocks.push(parse_html_block(lines, &mut i));
            continue;
        }

        blocks.push(parse_paragraph(lines, &mut i));
    }

    blocks
}

fn parse_indented_code(lines: &[Cursor], i: &mut usize) -> Block {
    let start = lines[*i].number;
    let mut end = start;
    while *i < lines.len() {
        let cur = lines[*i];
        if cur.is_blank() {
            // Trailing blanks belong to whatever follows the code block.
            let mut j = *i;
            while j < lines.len() && lines[j].is_blank() {
                j += 1;
            }
            if j < lines.len() && lines[j].indent() >= 4 {
                *i = j;
                continue;
            }
            break;
        }
        if cur.indent() < 4 {
            break;
        }
        end = cur.number;
        *i += 1;
    }
    Block::CodeBlock(CodeBlock {
        fence: FenceKind::Indented,
        info: None,
        fence_closed: true,
        span: Span::new(start, end),
    })
}

fn parse_fenced_code(
    lines: &[Cursor],
    i: &mut usize,
    fence_char: char,
    fence_len: usize,
    info: Option<String>,
) -> Block {
    let start = lines[*i].number;
    *i += 1;

    let fence = if fence_char == '`' {
        FenceKind::Backtick
    } else {
        FenceKind::Tilde
    };

    while *i < lines.len() {
        let cur = lines[*i];
        let trimmed = cur.text.trim();
        let closes = trimmed.chars().all(|c| c == fence_char)
            && trimmed.chars().count() >= fence_len
            && !trimmed.is_empty();
        *i += 1;
        if closes {
            return Block::CodeBlock(CodeBlock {
                fence,
                info,
                fence_closed: true,
                span: Span::new(start, cur.number),
            });
        }
    }

    // Unterminated fence: best-effort boundary at end-of-document.
    let end = lines.last().map(|c| c.number).unwrap_or(start);
    Block::CodeBlock(CodeBlock {
        fence,
        info,
        fence_closed: false,
        span: Span::new(start, end),
    })
}

/// Opening fence: three or more backticks or tildes, optional info string.
fn fence_open(trimmed: &str) -> Option<(char, usize, Option<String>)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let len = trimmed.chars().take_while(|&c| c == first).count();
    if len < 3 {
        return None;
    }
    let rest = trimmed[len..].trim();
    // An info string containing the fence character is not an opener.
    if first == '`' && rest.contains('`') {
        return None;
    }
    let info = if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    };
    Some((first, len, info))
}

fn parse_atx_heading(cur: Cursor, indent: usize) -> Option<Heading> {
    let trimmed = &cur.text[indent..];
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let after = &trimmed[level..];
    if !after.is_empty() && !after.starts_with(' ') && !after.starts_with('\t') {
        return None;
    }

    let content = after.trim_start();
    let content_offset = trimmed.len() - content.len();

    // Closed ATX: content ends with a run of '#' preceded by a space.
    let mut style = HeadingStyle::Atx;
    let mut text = content.trim_end().to_string();
    let stripped = text.trim_end_matches('#');
    if stripped.len() < text.len() && (stripped.is_empty() || stripped.ends_with(' ')) {
        style = HeadingStyle::AtxClosed;
        text = stripped.trim_end().to_string();
    }

    let inlines = scan_inlines(cur.number, cur.column + indent + content_offset, &text);
    Some(Heading {
        level: level as u8,
        style,
        text,
        inlines,
        span: Span::line(cur.number),
    })
}

/// Thematic break: a line of three or more `-`, `*`, or `_` (spaces allowed).
fn is_thematic_break(trimmed: &str) -> bool {
    let mut marker = None;
    let mut count = 0;
    for ch in trimmed.trim_end().chars() {
        match ch {
            ' ' | '\t' => {}
            '-' | '*' | '_' => {
                if let Some(m) = marker {
                    if m != ch {
                        return false;
                    }
                } else {
                    marker = Some(ch);
                }
                count += 1;
            }
            _ => return false,
        }
    }
    count >= 3
}

struct ItemStart {
    marker: ListMarker,
    /// Offset of the marker character within the cursor text.
    marker_offset: usize,
    /// Offset of the item content within the cursor text.
    content_offset: usize,
}

/// Recognizes a list item marker at up to three spaces of indentation.
fn item_start(cur: Cursor) -> Option<ItemStart> {
    let indent = cur.indent();
    if indent > 3 {
        return None;
    }
    let rest = &cur.text[indent..];
    let first = rest.chars().next()?;

    if let Some(ul) = UlMarker::from_char(first) {
        let after = &rest[1..];
        if !(after.is_empty() || after.starts_with(' ') || after.starts_with('\t')) {
            return None;
        }
        let spaces = after.chars().take_while(|&c| c == ' ' || c == '\t').count();
        // Bullet followed by only whitespace is an empty item, not a bullet
        // for a thematic break (those are caught earlier).
        let content_offset = indent + 1 + spaces.max(1);
        return Some(ItemStart {
            marker: ListMarker::Unordered(ul),
            marker_offset: indent,
            content_offset: content_offset.min(cur.text.len().max(indent + 2)),
        });
    }

    if first.is_ascii_digit() {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 9 {
            return None;
        }
        let after_digits = &rest[digits..];
        let delim = after_digits.chars().next()?;
        if delim != '.' && delim != ')' {
            return None;
        }
        let after = &after_digits[1..];
        if !(after.is_empty() || after.starts_with(' ') || after.starts_with('\t')) {
            return None;
        }
        let ordinal: u64 = rest[..digits].parse().ok()?;
        let spaces = after.chars().take_while(|&c| c == ' ' || c == '\t').count();
        let content_offset = indent + digits + 1 + spaces.max(1);
        return Some(ItemStart {
            marker: ListMarker::Ordered(ordinal),
            marker_offset: indent,
            content_offset,
        });
    }

    None
}

fn parse_list(lines: &[Cursor], i: &mut usize, nesting: usize) -> Block {
    let first = item_start(lines[*i]).map(|s| s.marker);
    let kind = match first {
        Some(ListMarker::Ordered(_)) => ListKind::Ordered,
        _ => ListKind::Unordered,
    };

    let list_start = lines[*i].number;
    let mut list_end = list_start;
    let mut items = Vec::new();

    while *i < lines.len() {
        let cur = lines[*i];

        if cur.is_blank() {
            // The list continues across blanks only if the next content line
            // is another item or indented continuation.
            let mut j = *i;
            while j < lines.len() && lines[j].is_blank() {
                j += 1;
            }
            if j >= lines.len() {
                break;
            }
            let next = lines[j];
            if item_start(next).is_none() && next.indent() < 2 {
                break;
            }
            *i = j;
            continue;
        }

        let Some(start) = item_start(cur) else {
            break;
        };
        // A marker of the other kind starts a sibling list, not an item here.
        let same_kind = matches!(
            (kind, start.marker),
            (ListKind::Unordered, ListMarker::Unordered(_))
                | (ListKind::Ordered, ListMarker::Ordered(_))
        );
        if !same_kind {
            break;
        }

        let item_line = cur.number;
        let marker_column = cur.column + start.marker_offset;
        let content_indent = start.content_offset;

        let mut content: Vec<Cursor> = Vec::new();
        let first_content = if start.content_offset <= cur.text.len() {
            &cur.text[start.content_offset..]
        } else {
            ""
        };
        content.push(Cursor {
            number: cur.number,
            column: cur.column + start.content_offset,
            text: first_content,
        });
        let mut item_end = cur.number;
        *i += 1;

        while *i < lines.len() {
            let cont = lines[*i];
            if cont.is_blank() {
                let mut j = *i;
                while j < lines.len() && lines[j].is_blank() {
                    j += 1;
                }
                let continues = j < lines.len()
                    && item_start(lines[j]).is_none()
                    && lines[j].indent() >= content_indent;
                if !continues {
                    break;
                }
                for blank in &lines[*i..j] {
                    content.push(*blank);
                }
                *i = j;
                continue;
            }
            // Indented at least to the content column: continuation, even
            // when it looks like an item (that is a nested list).
            if cont.indent() >= content_indent {
                content.push(cont.stripped(content_indent));
                item_end = cont.number;
                *i += 1;
                continue;
            }
            break;
        }

        let blocks = parse_blocks(&content, nesting + 1);
        items.push(ListItem {
            marker: start.marker,
            line: item_line,
            marker_column,
            blocks,
            span: Span::new(item_line, item_end),
        });
        list_end = item_end;
    }

    Block::List(List {
        kind,
        items,
        nesting,
        span: Span::new(list_start, list_end),
    })
}

fn is_table_start(lines: &[Cursor], i: usize) -> bool {
    lines[i].text.contains('|')
        && i + 1 < lines.len()
        && is_table_delimiter(lines[i + 1].text)
}

/// Delimiter row: `| --- | :--: |` shaped, at least one dash.
fn is_table_delimiter(text: &str) -> bool {
    let trimmed = text.trim();
    if !trimmed.contains('-') || !trimmed.contains('|') {
        return false;
    }
    trimmed
        .chars()
        .all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
}

fn parse_table(lines: &[Cursor], i: &mut usize) -> Block {
    let start = lines[*i].number;
    let mut end = start;
    while *i < lines.len() {
        let cur = lines[*i];
        if cur.is_blank() || !cur.text.contains('|') {
            break;
        }
        end = cur.number;
        *i += 1;
    }
    Block::Table(Table {
        span: Span::new(start, end),
    })
}

fn is_html_block_start(trimmed: &str) -> bool {
    // Comments are not content; the inline scanner consumes them silently.
    if trimmed.starts_with("<!--") {
        return false;
    }
    let mut chars = trimmed.chars();
    if chars.next() != Some('<') {
        return false;
    }
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn parse_html_block(lines: &[Cursor], i: &mut usize) -> Block {
    let start_cursor = lines[*i];
    let start = start_cursor.number;
    let mut end = start;

    let trimmed = start_cursor.text.trim_start();
    let element = if trimmed.starts_with("<!") {
        None
    } else {
        let name: String = trimmed[1..]
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if name.is_empty() {
            None
        } else {
            Some(name.to_lowercase())
        }
    };

    while *i < lines.len() && !lines[*i].is_blank() {
        end = lines[*i].number;
        *i += 1;
    }

    Block::Html(HtmlBlock {
        element,
        span: Span::new(start, end),
    })
}

/// Setext underline: a line of only `=` (level 1) or only `-` (level 2).
fn setext_level(trimmed: &str) -> Option<u8> {
    let t = trimmed.trim_end();
    if !t.is_empty() && t.chars().all(|c| c == '=') {
        return Some(1);
    }
    if !t.is_empty() && t.chars().all(|c| c == '-') {
        return Some(2);
    }
    None
}

fn parse_paragraph(lines: &[Cursor], i: &mut usize) -> Block {
    let start = lines[*i].number;
    let mut end = start;
    let mut collected: Vec<Cursor> = Vec::new();

    while *i < lines.len() {
        let cur = lines[*i];
        if cur.is_blank() {
            break;
        }
        let indent = cur.indent();
        let trimmed = &cur.text[indent..];

        if !collected.is_empty() && indent <= 3 {
            if let Some(level) = setext_level(trimmed) {
                // The collected run becomes a setext heading.
                *i += 1;
                let text = collected
                    .iter()
                    .map(|c| c.text.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut inlines = Vec::new();
                for c in &collected {
                    let ind = c.indent();
                    inlines.extend(scan_inlines(c.number, c.column + ind, c.text.trim()));
                }
                return Block::Heading(Heading {
                    level,
                    style: HeadingStyle::Setext,
                    text,
                    inlines,
                    span: Span::new(start, cur.number),
                });
            }
        }

        let interrupts = indent <= 3
            && (fence_open(trimmed).is_some()
                || parse_atx_heading(cur, indent).is_some()
                || is_thematic_break(trimmed)
                || item_start(cur).is_some()
                || is_html_block_start(trimmed)
                || is_table_start(lines, *i));
        if interrupts && !collected.is_empty() {
            break;
        }

        collected.push(cur);
        end = cur.number;
        *i += 1;
    }

    let mut inlines: Vec<Inline> = Vec::new();
    for c in &collected {
        let ind = c.indent();
        inlines.extend(scan_inlines(c.number, c.column + ind, c.text[ind..].trim_end()));
    }

    Block::Paragraph(Paragraph {
        inlines,
        span: Span::new(start, end),
    })
}
