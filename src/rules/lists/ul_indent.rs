use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{Block, Document, ListKind};

const DEFAULT_INDENT: i64 = 2;

/// MD007: unordered list indentation must be a multiple of the configured
/// step per nesting level.
///
/// Only unordered ancestors count toward the expected indentation, and
/// lists nested inside an ordered list are not checked at all: their items
/// align to the ordered marker's content column, which is not on the grid.
pub struct UlIndent;

impl Rule for UlIndent {
    fn code(&self) -> &'static str {
        "MD007"
    }

    fn name(&self) -> &'static str {
        "ul-indent"
    }

    fn description(&self) -> &'static str {
        "Unordered list indentation"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "indent",
            kind: OptionKind::Int,
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let indent = options.get_int("indent").unwrap_or(DEFAULT_INDENT);
        let indent = if indent > 0 { indent as usize } else { return Vec::new() };

        let mut violations = Vec::new();
        self.walk(document.blocks(), 0, indent, &mut violations);
        violations
    }
}

impl UlIndent {
    fn walk(&self, blocks: &[Block], depth: usize, indent: usize, out: &mut Vec<Violation>) {
        for block in blocks {
            let Block::List(list) = block else { continue };
            if list.kind != ListKind::Unordered {
                continue;
            }
            let expected = depth * indent;
            for item in &list.items {
                let actual = item.marker_column - 1;
                if actual != expected {
                    out.push(
                        Violation::new(
                            self.code(),
                            self.name(),
                            format!(
                                "list item indented {} columns, expected {}",
                                actual, expected
                            ),
                            item.line,
                        )
                        .with_column(item.marker_column),
                    );
                }
                self.walk(&item.blocks, depth + 1, indent, out);
            }
        }
    }
}
