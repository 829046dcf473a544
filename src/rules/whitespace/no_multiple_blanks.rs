use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{spans_contain, Document};

/// MD012: more consecutive blank lines than the configured maximum.
pub struct NoMultipleBlanks;

impl Rule for NoMultipleBlanks {
    fn code(&self) -> &'static str {
        "MD012"
    }

    fn name(&self) -> &'static str {
        "no-multiple-blanks"
    }

    fn description(&self) -> &'static str {
        "Multiple consecutive blank lines"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "maximum",
            kind: OptionKind::Int,
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let maximum = options.get_int("maximum").unwrap_or(1).max(0) as usize;
        let code_spans = document.code_block_spans();

        let mut violations = Vec::new();
        let mut run = 0usize;
        for (idx, line) in document.lines.iter().enumerate() {
            let number = idx + 1;
            // Blank lines inside code fences are content, not spacing.
            if line.trim().is_empty() && !spans_contain(&code_spans, number) {
                run += 1;
                if run > maximum {
                    violations.push(Violation::new(
                        self.code(),
                        self.name(),
                        format!("{} consecutive blank lines, expected at most {}", run, maximum),
                        number,
                    ));
                }
            } else {
                run = 0;
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_config, BasePolicy, Directive, OptionValue};
    use crate::parser::parse_document;
    use crate::registry::Registry;

    #[test]
    fn test_single_blank_passes() {
        let violations =
            NoMultipleBlanks.check(&parse_document("a\n\nb\n"), &RuleOptions::empty());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_double_blank_is_flagged() {
        let violations =
            NoMultipleBlanks.check(&parse_document("a\n\n\nb\n"), &RuleOptions::empty());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
    }

    #[test]
    fn test_each_extra_blank_is_flagged() {
        let violations =
            NoMultipleBlanks.check(&parse_document("a\n\n\n\nb\n"), &RuleOptions::empty());
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].line, 3);
        assert_eq!(violations[1].line, 4);
    }

    #[test]
    fn test_maximum_option() {
        let registry = Registry::builtin();
        let directives = [Directive::SetStyle {
            code: "MD012".to_string(),
            option: "maximum".to_string(),
            value: OptionValue::Int(2),
        }];
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        let doc = parse_document("a\n\n\nb\n");
        let violations = NoMultipleBlanks.check(&doc, &config.options("MD012"));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_blanks_inside_code_fence_ignored() {
        let violations = NoMultipleBlanks.check(
            &parse_document("```\ntext\n\n\n\nmore\n```\n"),
            &RuleOptions::empty(),
        );
        assert!(violations.is_empty());
    }
}
