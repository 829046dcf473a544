use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{Block, Document, ListKind, ListMarker};

/// MD029: ordered list item prefixes.
///
/// `one` requires every ordinal to be 1, `ordered` requires 1, 2, 3 and so
/// on, and `one_or_ordered` (the default) accepts either scheme per list.
pub struct OlPrefix;

impl Rule for OlPrefix {
    fn code(&self) -> &'static str {
        "MD029"
    }

    fn name(&self) -> &'static str {
        "ol-prefix"
    }

    fn description(&self) -> &'static str {
        "Ordered list item prefix"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "style",
            kind: OptionKind::Enum(&["one", "ordered", "one_or_ordered"]),
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let style = options.get_str("style").unwrap_or("one_or_ordered");

        let mut violations = Vec::new();
        for block in document.all_blocks() {
            let Block::List(list) = block else { continue };
            if list.kind != ListKind::Ordered {
                continue;
            }
            let ordinals: Vec<(u64, usize, usize)> = list
                .items
                .iter()
                .filter_map(|item| match item.marker {
                    ListMarker::Ordered(n) => Some((n, item.line, item.marker_column)),
                    ListMarker::Unordered(_) => None,
                })
                .collect();
            if ordinals.is_empty() {
                continue;
            }

            let check_ordered = match style {
                "one" => false,
                "ordered" => true,
                // Second item decides which scheme this list follows.
                _ => ordinals.get(1).is_some_and(|&(n, _, _)| n == 2),
            };

            for (idx, &(ordinal, line, column)) in ordinals.iter().enumerate() {
                let expected = if check_ordered { idx as u64 + 1 } else { 1 };
                if ordinal != expected {
                    violations.push(
                        Violation::new(
                            self.code(),
                            self.name(),
                            format!("list item prefix {}, expected {}", ordinal, expected),
                            line,
                        )
                        .with_column(column),
                    );
                }
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

    fn check_with(source: &str, style: Option<&str>) -> Vec<Violation> {
        let registry = Registry::builtin();
        let directives: Vec<Directive> = style
            .map(|s| {
                vec![Directive::SetStyle {
                    code: "MD029".to_string(),
                    option: "style".to_string(),
                    value: OptionValue::Str(s.to_string()),
                }]
            })
            .unwrap_or_default();
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        OlPrefix.check(&parse_document(source), &config.options("MD029"))
    }

    #[test]
    fn test_default_accepts_all_ones() {
        let violations = check_with("1. one\n1. two\n1. three\n", None);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_default_accepts_sequential() {
        let violations = check_with("1. one\n2. two\n3. three\n", None);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_default_flags_broken_sequence() {
        let violations = check_with("1. one\n2. two\n5. three\n", None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
    }

    #[test]
    fn test_one_style_flags_sequential() {
        let violations = check_with("1. one\n2. two\n", Some("one"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].column, Some(1));
    }

    #[test]
    fn test_ordered_style_flags_all_ones() {
        let violations = check_with("1. one\n1. two\n1. three\n", Some("ordered"));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_unordered_lists_ignored() {
        let violations = check_with("- one\n- two\n", Some("ordered"));
        assert!(violations.is_empty());
    }
}
