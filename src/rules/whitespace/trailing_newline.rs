use crate::config::RuleOptions;
use crate::linter::{Rule, Violation};
use crate::parser::ast::Document;

/// MD047: files must end with a newline character.
pub struct TrailingNewline;

impl Rule for TrailingNewline {
    fn code(&self) -> &'static str {
        "MD047"
    }

    fn name(&self) -> &'static str {
        "single-trailing-newline"
    }

    fn description(&self) -> &'static str {
        "File should end with a newline character"
    }

    fn check(&self, document: &Document, _options: &RuleOptions) -> Vec<Violation> {
        if document.line_count() == 0 || document.ends_with_newline {
            return Vec::new();
        }
        let last = document.line_count();
        let column = document
            .line(last)
            .map(|l| l.chars().count() + 1)
            .unwrap_or(1);
        vec![
            Violation::new(
                self.code(),
                self.name(),
                "file does not end with a newline character",
                last,
            )
            .with_column(column),
        ]
    }
}
