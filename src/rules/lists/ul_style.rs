use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{Block, Document, ListMarker, UlMarker};

/// MD004: unordered list item marker must match the configured style.
///
/// With `consistent` (the default) the first unordered item in the document
/// sets the expected marker.
pub struct UlStyle;

impl Rule for UlStyle {
    fn code(&self) -> &'static str {
        "MD004"
    }

    fn name(&self) -> &'static str {
        "ul-style"
    }

    fn description(&self) -> &'static str {
        "Unordered list style"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "style",
            kind: OptionKind::Enum(&["consistent", "asterisk", "plus", "dash"]),
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let style = options.get_str("style").unwrap_or("consistent");
        let mut expected = match style {
            "asterisk" => Some(UlMarker::Asterisk),
            "plus" => Some(UlMarker::Plus),
            "dash" => Some(UlMarker::Dash),
            _ => None,
        };

        let mut violations = Vec::new();
        for block in document.all_blocks() {
            let Block::List(list) = block else { continue };
            for item in &list.items {
                let ListMarker::Unordered(marker) = item.marker else {
                    continue;
                };
                let expected = *expected.get_or_insert(marker);
                if marker != expected {
                    violations.push(
                        Violation::new(
                            self.code(),
                            self.name(),
                            format!(
                                "list marker {} does not match expected style {}",
                                marker.as_str(),
                                expected.as_str()
                            ),
                            item.line,
                        )
                        .with_column(item.marker_column),
                    );
                }
            }
        }
        violations
    }
}
