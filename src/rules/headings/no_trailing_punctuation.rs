use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::Document;

const DEFAULT_PUNCTUATION: &str = ".,;:!?";

/// MD026: trailing punctuation in heading text.
pub struct NoTrailingPunctuation;

impl Rule for NoTrailingPunctuation {
    fn code(&self) -> &'static str {
        "MD026"
    }

    fn name(&self) -> &'static str {
        "no-trailing-punctuation"
    }

    fn description(&self) -> &'static str {
        "Trailing punctuation in heading"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "punctuation",
            kind: OptionKind::Str,
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let punctuation = options.get_str("punctuation").unwrap_or(DEFAULT_PUNCTUATION);

        let mut violations = Vec::new();
        for heading in document.headings() {
            let Some(last) = heading.text.chars().next_back() else {
                continue;
            };
            if !punctuation.contains(last) {
                continue;
            }
            // Column of the offending character, relative to where the
            // heading text starts on the line.
            let column = heading
                .inlines
                .first()
                .map(|inline| inline.columns.0 + heading.text.chars().count() - 1);
            let mut violation = Violation::new(
                self.code(),
                self.name(),
                format!("heading ends with punctuation {:?}", last),
                heading.span.start,
            );
            if let Some(column) = column {
                violation = violation.with_column(column);
            }
            violations.push(violation);
        }
        violations
    }
}
