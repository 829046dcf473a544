//! Rule registry: the set of available rules, keyed by stable code.
//!
//! Populated once at startup and read-only afterwards. Passed explicitly to
//! the resolver and the engine; there is no ambient global state.

use crate::config::ConfigError;
use crate::linter::Rule;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct Registry {
    rules: Vec<Box<dyn Rule>>,
    by_code: BTreeMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the full builtin rule catalog.
    pub fn builtin() -> Self {
        use crate::rules::{
            HeadingStyleRule, LineLength, NoDuplicateHeading, NoHardTabs, NoInlineHtml,
            NoMultipleBlanks, NoTrailingPunctuation, OlPrefix, TrailingNewline, UlIndent,
            UlStyle,
        };

        let mut registry = Self::new();
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HeadingStyleRule),
            Box::new(UlStyle),
            Box::new(UlIndent),
            Box::new(NoHardTabs),
            Box::new(NoMultipleBlanks),
            Box::new(LineLength),
            Box::new(NoDuplicateHeading),
            Box::new(NoTrailingPunctuation),
            Box::new(OlPrefix),
            Box::new(NoInlineHtml),
            Box::new(TrailingNewline),
        ];
        for rule in rules {
            registry
                .register(rule)
                .expect("builtin rule codes are unique");
        }
        registry
    }

    /// Adds a rule. Fails when the code is already registered.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), ConfigError> {
        let code = rule.code();
        if self.by_code.contains_key(code) {
            return Err(ConfigError::DuplicateRuleCode(code.to_string()));
        }
        self.by_code.insert(code.to_string(), self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Looks up a rule by code.
    pub fn get(&self, code: &str) -> Result<&dyn Rule, ConfigError> {
        self.by_code
            .get(code)
            .map(|&idx| self.rules[idx].as_ref())
            .ok_or_else(|| ConfigError::UnknownRuleCode(code.to_string()))
    }

    /// Iterates over all registered rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
