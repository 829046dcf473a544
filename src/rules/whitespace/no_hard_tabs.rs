use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{spans_contain, Document};

/// MD010: hard tab characters anywhere in the line.
pub struct NoHardTabs;

impl Rule for NoHardTabs {
    fn code(&self) -> &'static str {
        "MD010"
    }

    fn name(&self) -> &'static str {
        "no-hard-tabs"
    }

    fn description(&self) -> &'static str {
        "Hard tabs"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "ignore_code_blocks",
            kind: OptionKind::Bool,
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let ignore_code = options.get_bool("ignore_code_blocks").unwrap_or(false);
        let code_spans = if ignore_code {
            document.code_block_spans()
        } else {
            Vec::new()
        };

        let mut violations = Vec::new();
        for (idx, line) in document.lines.iter().enumerate() {
            let number = idx + 1;
            if ignore_code && spans_contain(&code_spans, number) {
                continue;
            }
            if let Some(pos) = line.chars().position(|c| c == '\t') {
                violations.push(
                    Violation::new(self.code(), self.name(), "hard tab character", number)
                        .with_column(pos + 1),
                );
            }
        }
        violations
    }
}
