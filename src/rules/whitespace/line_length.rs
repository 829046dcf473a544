use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{spans_contain, Document};

const DEFAULT_LINE_LENGTH: i64 = 80;

/// MD013: lines longer than the configured limit.
pub struct LineLength;

impl Rule for LineLength {
    fn code(&self) -> &'static str {
        "MD013"
    }

    fn name(&self) -> &'static str {
        "line-length"
    }

    fn description(&self) -> &'static str {
        "Line length"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[
            OptionSpec {
                name: "line_length",
                kind: OptionKind::Int,
            },
            // `tables => false` / `code_blocks => false` exempt those
            // regions from the limit.
            OptionSpec {
                name: "tables",
                kind: OptionKind::Bool,
            },
            OptionSpec {
                name: "code_blocks",
                kind: OptionKind::Bool,
            },
        ]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let limit = options.get_int("line_length").unwrap_or(DEFAULT_LINE_LENGTH);
        let limit = if limit > 0 { limit as usize } else { return Vec::new() };
        let check_tables = options.get_bool("tables").unwrap_or(true);
        let check_code = options.get_bool("code_blocks").unwrap_or(true);

        let table_spans = if check_tables {
            Vec::new()
        } else {
            document.table_spans()
        };
        let code_spans = if check_code {
            Vec::new()
        } else {
            document.code_block_spans()
        };

        let mut violations = Vec::new();
        for (idx, line) in document.lines.iter().enumerate() {
            let number = idx + 1;
            let length = line.chars().count();
            if length <= limit {
                continue;
            }
            if spans_contain(&table_spans, number) || spans_contain(&code_spans, number) {
                continue;
            }
            violations.push(
                Violation::new(
                    self.code(),
                    self.name(),
                    format!("line length {} exceeds {} characters", length, limit),
                    number,
                )
                .with_column(limit + 1),
            );
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

    fn check_with(source: &str, directives: &[Directive]) -> Vec<Violation> {
        let registry = Registry::builtin();
        let config = resolve_config(&registry, BasePolicy::AllEnabled, directives).unwrap();
        LineLength.check(&parse_document(source), &config.options("MD013"))
    }

    fn set(option: &str, value: OptionValue) -> Directive {
        Directive::SetStyle {
            code: "MD013".to_string(),
            option: option.to_string(),
            value,
        }
    }

    #[test]
    fn test_long_line_is_flagged() {
        let source = format!("short\n{}\n", "x".repeat(85));
        let violations = check_with(&source, &[set("line_length", OptionValue::Int(80))]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].column, Some(81));
        assert_eq!(violations[0].rule, "MD013");
    }

    #[test]
    fn test_default_limit_is_80() {
        let source = format!("{}\n", "x".repeat(81));
        let violations = LineLength.check(&parse_document(&source), &RuleOptions::empty());
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_line_at_limit_passes() {
        let source = format!("{}\n", "x".repeat(80));
        let violations = LineLength.check(&parse_document(&source), &RuleOptions::empty());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let source = format!("{}\n", "ä".repeat(80));
        let violations = LineLength.check(&parse_document(&source), &RuleOptions::empty());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_tables_exempt_when_disabled() {
        let long = "y".repeat(90);
        let source = format!("| {} |\n| --- |\n", long);
        let flagged = check_with(&source, &[]);
        assert_eq!(flagged.len(), 1);
        let exempt = check_with(&source, &[set("tables", OptionValue::Bool(false))]);
        assert!(exempt.is_empty());
    }

    #[test]
    fn test_code_blocks_exempt_when_disabled() {
        let source = format!("```\n{}\n```\n", "z".repeat(90));
        let flagged = check_with(&source, &[]);
        assert_eq!(flagged.len(), 1);
        let exempt = check_with(&source, &[set("code_blocks", OptionValue::Bool(false))]);
        assert!(exempt.is_empty());
    }
}
