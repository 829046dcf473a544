use crate::config::{OptionKind, OptionSpec, RuleOptions};
use crate::linter::{Rule, Violation};
use crate::parser::ast::{Block, Document, InlineKind};

/// MD033: raw HTML in Markdown content.
pub struct NoInlineHtml;

impl NoInlineHtml {
    fn violation(&self, element: Option<&str>, line: usize) -> Violation {
        let message = match element {
            Some(name) => format!("inline HTML element <{}>", name),
            None => "inline HTML".to_string(),
        };
        Violation::new(self.code(), self.name(), message, line)
    }
}

impl Rule for NoInlineHtml {
    fn code(&self) -> &'static str {
        "MD033"
    }

    fn name(&self) -> &'static str {
        "no-inline-html"
    }

    fn description(&self) -> &'static str {
        "Inline HTML"
    }

    fn options(&self) -> &'static [OptionSpec] {
        &[
            // Comma-separated element names to allow, e.g. "br,img".
            OptionSpec {
                name: "allowed_elements",
                kind: OptionKind::Str,
            },
        ]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation> {
        let allowed: Vec<String> = options
            .get_str("allowed_elements")
            .unwrap_or("")
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        let is_allowed =
            |element: Option<&str>| element.is_some_and(|e| allowed.iter().any(|a| a == e));

        let mut violations = Vec::new();
        for block in document.all_blocks() {
            let inlines = match block {
                Block::Html(html) => {
                    if !is_allowed(html.element.as_deref()) {
                        violations.push(self.violation(html.element.as_deref(), html.span.start));
                    }
                    continue;
                }
                Block::Paragraph(p) => &p.inlines,
                Block::Heading(h) => &h.inlines,
                _ => continue,
            };
            for inline in inlines {
                if inline.kind != InlineKind::Html {
                    continue;
                }
                if is_allowed(Some(inline.text.as_str())) {
                    continue;
                }
                violations.push(
                    self.violation(Some(inline.text.as_str()), inline.line)
                        .with_column(inline.columns.0),
                );
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

    fn check_allowing(source: &str, allowed: &str) -> Vec<Violation> {
        let registry = Registry::builtin();
        let directives = [Directive::SetStyle {
            code: "MD033".to_string(),
            option: "allowed_elements".to_string(),
            value: OptionValue::Str(allowed.to_string()),
        }];
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        NoInlineHtml.check(&parse_document(source), &config.options("MD033"))
    }

    #[test]
    fn test_inline_tag_is_flagged() {
        let doc = parse_document("text with <br> in it\n");
        let violations = NoInlineHtml.check(&doc, &RuleOptions::empty());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
        assert_eq!(violations[0].column, Some(11));
        assert!(violations[0].message.contains("<br>"));
    }

    #[test]
    fn test_html_block_is_flagged() {
        let doc = parse_document("<div>\nblock\n</div>\n");
        let violations = NoInlineHtml.check(&doc, &RuleOptions::empty());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn test_plain_text_passes() {
        let doc = parse_document("no markup, 1 < 2 here\n");
        let violations = NoInlineHtml.check(&doc, &RuleOptions::empty());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allowed_elements() {
        let violations = check_allowing("a <br> and an <img src=\"x\">\n", "br, img");
        assert!(violations.is_empty());

        let violations = check_allowing("a <br> and a <span>\n", "br");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("<span>"));
    }

    #[test]
    fn test_standalone_comment_is_not_flagged() {
        let doc = parse_document("<!-- just a comment -->\n\ntext\n");
        let violations = NoInlineHtml.check(&doc, &RuleOptions::empty());
        assert!(violations.is_empty(), "got: {:?}", violations);
    }

    #[test]
    fn test_html_inside_heading_is_flagged() {
        let doc = parse_document("# Title <sup>1</sup>\n");
        let violations = NoInlineHtml.check(&doc, &RuleOptions::empty());
        assert!(!violations.is_empty());
        assert_eq!(violations[0].line, 1);
    }
}
