//! The rule trait, violations, and the evaluation engine.

use crate::config::{OptionSpec, ResolvedConfig, RuleOptions};
use crate::parser::ast::Document;
use crate::registry::Registry;
#[cfg(feature = "cli")]
use rayon::prelude::*;
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

/// Code used for the synthetic violation emitted when a rule panics.
pub const RULE_FAULT_CODE: &str = "RuleFault";

/// One reported instance of a rule being broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Stable rule code, e.g. `MD013`.
    pub rule: String,
    /// Human-readable rule name, e.g. `line-length`.
    pub name: String,
    pub message: String,
    /// Source line (1-indexed).
    pub line: usize,
    /// Source column (1-indexed), when the rule can pinpoint one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Violation {
    pub fn new(rule: &str, name: &str, message: impl Into<String>, line: usize) -> Self {
        Self {
            rule: rule.to_string(),
            name: name.to_string(),
            message: message.into(),
            line,
            column: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Synthetic violation emitted when a rule faults during evaluation.
    /// A fault has no meaningful source location; line 1 keeps it sortable.
    pub fn rule_fault(code: &str) -> Self {
        Self {
            rule: RULE_FAULT_CODE.to_string(),
            name: "rule-fault".to_string(),
            message: format!("rule {} failed during evaluation", code),
            line: 1,
            column: None,
        }
    }
}

/// A single lint check.
///
/// `check` must be a pure function of the document and the resolved options:
/// no hidden state, no I/O. That contract is what allows the engine to run
/// rules in parallel.
pub trait Rule: Send + Sync {
    /// Stable code, e.g. `"MD013"`.
    fn code(&self) -> &'static str;

    /// Short name, e.g. `"line-length"`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Whether the rule is enabled under [`BasePolicy::Default`].
    ///
    /// [`BasePolicy::Default`]: crate::config::BasePolicy::Default
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Declared configuration options, validated at resolution time.
    fn options(&self) -> &'static [OptionSpec] {
        &[]
    }

    fn check(&self, document: &Document, options: &RuleOptions) -> Vec<Violation>;
}

/// Runs every enabled rule against a document.
pub struct Linter<'r> {
    registry: &'r Registry,
}

impl<'r> Linter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Evaluate all enabled rules. Output does not depend on evaluation
    /// order; the reporter owns the final ordering.
    ///
    /// Uses parallel iteration when the cli feature is enabled (via rayon).
    #[cfg(feature = "cli")]
    pub fn lint(&self, document: &Document, config: &ResolvedConfig) -> Vec<Violation> {
        let enabled: Vec<&dyn Rule> = self.enabled_rules(config);
        enabled
            .par_iter()
            .map(|rule| run_rule(*rule, document, config))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Evaluate all enabled rules (sequential fallback).
    #[cfg(not(feature = "cli"))]
    pub fn lint(&self, document: &Document, config: &ResolvedConfig) -> Vec<Violation> {
        self.enabled_rules(config)
            .into_iter()
            .flat_map(|rule| run_rule(rule, document, config))
            .collect()
    }

    fn enabled_rules(&self, config: &ResolvedConfig) -> Vec<&'r dyn Rule> {
        self.registry
            .rules()
            .filter(|rule| config.is_enabled(rule.code()))
            .collect()
    }
}

/// Run one rule with fault isolation: a panic inside a rule becomes a single
/// `RuleFault` violation instead of aborting the whole lint pass.
/// `AssertUnwindSafe` is sound here because rules only hold shared references
/// and may not mutate anything.
fn run_rule(rule: &dyn Rule, document: &Document, config: &ResolvedConfig) -> Vec<Violation> {
    let options = config.options(rule.code());
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(document, &options))) {
        Ok(violations) => violations,
        Err(_) => vec![Violation::rule_fault(rule.code())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_config, BasePolicy};
    use crate::parser::parse_document;

    struct PanickingRule;

    impl Rule for PanickingRule {
        fn code(&self) -> &'static str {
            "MD900"
        }
        fn name(&self) -> &'static str {
            "always-panics"
        }
        fn description(&self) -> &'static str {
            "Panics on every document"
        }
        fn check(&self, _document: &Document, _options: &RuleOptions) -> Vec<Violation> {
            panic!("boom");
        }
    }

    #[test]
    fn test_lint_runs_enabled_rules_only() {
        let registry = Registry::builtin();
        let linter = Linter::new(&registry);
        let doc = parse_document(&format!("# Title\n\n{}\n", "x".repeat(85)));

        let directives = [crate::config::Directive::Exclude("MD013".to_string())];
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &directives).unwrap();
        let violations = linter.lint(&doc, &config);
        assert!(violations.iter().all(|v| v.rule != "MD013"));

        let config = resolve_config(&registry, BasePolicy::AllEnabled, &[]).unwrap();
        let violations = linter.lint(&doc, &config);
        assert!(violations.iter().any(|v| v.rule == "MD013"));
    }

    #[test]
    fn test_lint_is_pure() {
        let registry = Registry::builtin();
        let linter = Linter::new(&registry);
        let doc = parse_document("#Bad\n\n- a\n* b\n");
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &[]).unwrap();

        let mut first = linter.lint(&doc, &config);
        let mut second = linter.lint(&doc, &config);
        let key = |v: &Violation| (v.line, v.rule.clone(), v.column, v.message.clone());
        first.sort_by_key(key);
        second.sort_by_key(key);
        assert_eq!(first, second);
    }

    #[test]
    fn test_panicking_rule_becomes_rule_fault() {
        let mut registry = Registry::builtin();
        registry.register(Box::new(PanickingRule)).unwrap();
        let linter = Linter::new(&registry);

        let doc = parse_document(&format!("{}\n", "x".repeat(85)));
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &[]).unwrap();
        let violations = linter.lint(&doc, &config);

        let faults: Vec<_> = violations
            .iter()
            .filter(|v| v.rule == RULE_FAULT_CODE)
            .collect();
        assert_eq!(faults.len(), 1);
        assert!(faults[0].message.contains("MD900"));

        // Other rules still report.
        assert!(violations.iter().any(|v| v.rule == "MD013"));
    }
}
