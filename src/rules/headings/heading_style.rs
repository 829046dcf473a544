use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{Document, HeadingStyle};

/// MD003: heading style must match the configured style.
///
/// With `consistent` (the default) the first heading in the document sets
/// the expected style.
pub struct HeadingStyleRule;

impl Rule for HeadingStyleRule {
    fn code(&self) -> &'static str {
        "MD003"
    }

    fn name(&self) -> &'static str {
        "heading-style"
    }

    fn description(&self) -> &'static str {
        "Heading style"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "style",
            kind: OptionKind::Enum(&["consistent", "atx", "atx_closed", "setext"]),
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let style = options.get_str("style").unwrap_or("consistent");
        let mut headings = document.headings();

        let expected = match style {
            "atx" => HeadingStyle::Atx,
            "atx_closed" => HeadingStyle::AtxClosed,
            "setext" => HeadingStyle::Setext,
            _ => match headings.next() {
                Some(first) => first.style,
                None => return Vec::new(),
            },
        };

        let mut violations = Vec::new();
        for heading in headings {
            if heading.style == expected {
                continue;
            }
            // Setext has no syntax for levels 3 and deeper, so ATX headings
            // at those levels are the only way to write them.
            if expected == HeadingStyle::Setext && heading.level > 2 {
                continue;
            }
            violations.push(Violation::new(
                self.code(),
                self.name(),
                format!(
                    "heading style {} does not match expected style {}",
                    heading.style.as_str(),
                    expected.as_str()
                ),
                heading.span.start,
            ));
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
                    code: "MD003".to_string(),
                    option: "style".to_string(),
                    value: OptionValue::Str(s.to_string()),
                }]
            })
            .unwrap_or_default();
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        HeadingStyleRule.check(&parse_document(source), &config.options("MD003"))
    }

    #[test]
    fn test_consistent_follows_first_heading() {
        let violations = check_with("# One\n\n## Two\n", None);
        assert!(violations.is_empty());

        let violations = check_with("# One\n\n## Two ##\n", None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
    }

    #[test]
    fn test_consistent_accepts_setext_first() {
        let violations = check_with("One\n===\n\nTwo\n---\n", None);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_explicit_atx() {
        let violations = check_with("One\n===\n\n## Two\n", Some("atx"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn test_setext_allows_deep_atx() {
        let violations = check_with("One\n===\n\n### Deep\n", Some("setext"));
        assert!(violations.is_empty());

        let violations = check_with("One\n===\n\n## Two\n", Some("setext"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 4);
    }

    #[test]
    fn test_no_headings_passes() {
        let violations = check_with("just text\n", None);
        assert!(violations.is_empty());
    }
}
