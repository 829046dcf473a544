//! Inline scanner for a single source line.
//!
//! Produces [`Inline`] spans (code, emphasis, links, raw HTML, text) with
//! 1-indexed column ranges. Like the block parser, this scanner never fails:
//! unmatched delimiters fall back to plain text.

use super::ast::{Inline, InlineKind};

/// Scans one line of content starting at `start_column` (1-indexed column of
/// the first character of `text` within the original source line).
pub fn scan_inlines(line: usize, start_column: usize, text: &str) -> Vec<Inline> {
    let chars: Vec<char> = text.chars().collect();
    let mut inlines = Vec::new();
    let mut i = 0;
    let mut text_start = 0;

    let col = |idx: usize| start_column + idx;

    while i < chars.len() {
        let ch = chars[i];
        let matched = match ch {
            '`' => try_code_span(&chars, i),
            '<' => try_html(&chars, i),
            '[' => try_link(&chars, i),
            '*' | '_' => try_emphasis(&chars, i),
            '\\' => {
                // Backslash escape: skip the next character entirely.
                i += 2;
                continue;
            }
            _ => None,
        };

        if let Some(scan) = matched {
            if text_start < i {
                inlines.push(text_inline(line, col(text_start), &chars[text_start..i]));
            }
            if let Some((kind, content)) = scan.emit {
                inlines.push(Inline {
                    kind,
                    line,
                    columns: (col(i), col(scan.end)),
                    text: content,
                });
            }
            i = scan.end;
            text_start = i;
        } else {
            i += 1;
        }
    }

    if text_start < chars.len() {
        inlines.push(text_inline(line, col(text_start), &chars[text_start..]));
    }

    inlines
}

struct Scan {
    /// Index just past the construct.
    end: usize,
    /// Inline to emit, or `None` to silently consume (HTML comments).
    emit: Option<(InlineKind, String)>,
}

fn text_inline(line: usize, column: usize, chars: &[char]) -> Inline {
    Inline {
        kind: InlineKind::Text,
        line,
        columns: (column, column + chars.len()),
        text: chars.iter().collect(),
    }
}

/// Code span: a run of N backticks closed by the next run of exactly N.
fn try_code_span(chars: &[char], start: usize) -> Option<Scan> {
    let open_len = run_length(chars, start, '`');
    let mut i = start + open_len;
    while i < chars.len() {
        if chars[i] == '`' {
            let close_len = run_length(chars, i, '`');
            if close_len == open_len {
                let content: String = chars[start + open_len..i].iter().collect();
                return Some(Scan {
                    end: i + close_len,
                    emit: Some((InlineKind::Code, content.trim().to_string())),
                });
            }
            i += close_len;
        } else {
            i += 1;
        }
    }
    None
}

/// Raw HTML: `<tag ...>`, `</tag>`, or an HTML comment (consumed silently).
fn try_html(chars: &[char], start: usize) -> Option<Scan> {
    // <!-- comment -->
    if chars[start..].starts_with(&['<', '!', '-', '-']) {
        let mut i = start + 4;
        while i + 3 <= chars.len() {
            if chars[i..i + 3] == ['-', '-', '>'] {
                return Some(Scan {
                    end: i + 3,
                    emit: None,
                });
            }
            i += 1;
        }
        return None;
    }

    let mut i = start + 1;
    if i < chars.len() && chars[i] == '/' {
        i += 1;
    }
    let name_start = i;
    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
        i += 1;
    }
    if i == name_start || !chars[name_start].is_ascii_alphabetic() {
        return None;
    }
    let element: String = chars[name_start..i].iter().collect::<String>().to_lowercase();

    // Scan to the closing '>'.
    while i < chars.len() {
        if chars[i] == '>' {
            return Some(Scan {
                end: i + 1,
                emit: Some((InlineKind::Html, element)),
            });
        }
        i += 1;
    }
    None
}

/// Link: `[text](destination)`.
fn try_link(chars: &[char], start: usize) -> Option<Scan> {
    let mut i = start + 1;
    while i < chars.len() && chars[i] != ']' {
        if chars[i] == '\\' {
            i += 1;
        }
        i += 1;
    }
    if i >= chars.len() || i + 1 >= chars.len() || chars[i + 1] != '(' {
        return None;
    }
    let label: String = chars[start + 1..i].iter().collect();
    let mut j = i + 2;
    while j < chars.len() && chars[j] != ')' {
        j += 1;
    }
    if j >= chars.len() {
        return None;
    }
    Some(Scan {
        end: j + 1,
        emit: Some((InlineKind::Link, label)),
    })
}

/// Emphasis (`*x*`, `_x_`) or strong (`**x**`, `__x__`).
fn try_emphasis(chars: &[char], start: usize) -> Option<Scan> {
    let marker = chars[start];

    // Underscores inside words (snake_case) are not emphasis.
    if marker == '_' && start > 0 && chars[start - 1].is_ascii_alphanumeric() {
        return None;
    }

    let run = run_length(chars, start, marker).min(2);
    let content_start = start + run;
    if content_start >= chars.len() || chars[content_start].is_whitespace() {
        return None;
    }

    let mut i = content_start;
    while i < chars.len() {
        if chars[i] == marker && run_length(chars, i, marker) >= run && i > content_start {
            let content: String = chars[content_start..i].iter().collect();
            let kind = if run == 2 {
                InlineKind::Strong
            } else {
                InlineKind::Emphasis
            };
            return Some(Scan {
                end: i + run,
                emit: Some((kind, content)),
            });
        }
        i += 1;
    }
    None
}

fn run_length(chars: &[char], start: usize, ch: char) -> usize {
    chars[start..].iter().take_while(|&&c| c == ch).count()
}
