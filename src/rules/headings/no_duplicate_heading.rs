use std::collections::HashSet;

use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::Document;

/// MD024: headings with identical text.
///
/// With `allow_different_nesting` enabled, identical text is allowed when
/// the headings sit under different ancestor headings.
pub struct NoDuplicateHeading;

impl Rule for NoDuplicateHeading {
    fn code(&self) -> &'static str {
        "MD024"
    }

    fn name(&self) -> &'static str {
        "no-duplicate-heading"
    }

    fn description(&self) -> &'static str {
        "Multiple headings with the same content"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[OptionSpec {
            name: "allow_different_nesting",
            kind: OptionKind::Bool,
        }]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let allow_different_nesting =
            options.get_bool("allow_different_nesting").unwrap_or(false);

        let mut seen: HashSet<(String, String)> = HashSet::new();
        // Stack of (level, text) ancestors of the current heading.
        let mut ancestry: Vec<(u8, String)> = Vec::new();
        let mut violations = Vec::new();

        for heading in document.headings() {
            while ancestry.last().is_some_and(|(level, _)| *level >= heading.level) {
                ancestry.pop();
            }
            let path = if allow_different_nesting {
                ancestry
                    .iter()
                    .map(|(_, text)| text.as_str())
                    .collect::<Vec<_>>()
                    .join("/")
            } else {
                String::new()
            };

            if !seen.insert((path, heading.text.clone())) {
                violations.push(Violation::new(
                    self.code(),
                    self.name(),
                    format!("duplicate heading {:?}", heading.text),
                    heading.span.start,
                ));
            }
            ancestry.push((heading.level, heading.text.clone()));
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
    fn test_duplicate_is_flagged() {
        let doc = parse_document("# Intro\n\n## Setup\n\n## Setup\n");
        let violations = NoDuplicateHeading.check(&doc, &RuleOptions::empty());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 5);
    }

    #[test]
    fn test_distinct_headings_pass() {
        let doc = parse_document("# Intro\n\n## Setup\n\n## Usage\n");
        let violations = NoDuplicateHeading.check(&doc, &RuleOptions::empty());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allow_different_nesting() {
        let source = "# Client\n\n## Setup\n\n# Server\n\n## Setup\n";
        let doc = parse_document(source);

        let violations = NoDuplicateHeading.check(&doc, &RuleOptions::empty());
        assert_eq!(violations.len(), 1);

        let registry = Registry::builtin();
        let directives = [Directive::SetStyle {
            code: "MD024".to_string(),
            option: "allow_different_nesting".to_string(),
            value: OptionValue::Bool(true),
        }];
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        let violations = NoDuplicateHeading.check(&doc, &config.options("MD024"));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_same_nesting_still_flagged_when_allowed() {
        let source = "# Client\n\n## Setup\n\n## Setup\n";
        let registry = Registry::builtin();
        let directives = [Directive::SetStyle {
            code: "MD024".to_string(),
            option: "allow_different_nesting".to_string(),
            value: OptionValue::Bool(true),
        }];
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        let violations =
            NoDuplicateHeading.check(&parse_document(source), &config.options("MD024"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 5);
    }
}
