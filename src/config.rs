//! Configuration model: base policy, directives, option values, and the
//! resolver that turns them into an effective rule set.
//!
//! Resolution is fail-fast: the first invalid directive aborts with a
//! [`ConfigError`] naming the offending rule and option. Directives apply in
//! declaration order with last-write-wins semantics per field; setting an
//! option never clears previously set sibling options on the same rule, and
//! a `SetStyle` after an `Exclude` re-enables the rule.

use crate::registry::Registry;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Default enabled/disabled state applied before any directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BasePolicy {
    /// Every registered rule starts enabled (the `all` token).
    AllEnabled,
    /// Every registered rule starts disabled (the `no_rules` token).
    AllDisabled,
    /// Each rule starts at its own `enabled_by_default` flag.
    #[default]
    Default,
}

/// One configuration instruction, applied in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Enable a rule without touching its options (bare `rule 'MDxxx'`).
    Enable(String),
    /// Enable a rule and set one option (`rule 'MDxxx', :opt => value`).
    SetStyle {
        code: String,
        option: String,
        value: OptionValue,
    },
    /// Disable a rule (`exclude_rule 'MDxxx'`).
    Exclude(String),
}

/// A dynamically typed option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "bool",
            OptionValue::Int(_) => "integer",
            OptionValue::Str(_) => "string",
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Declared type of a rule option, checked at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    Str,
    /// String restricted to a fixed set of values.
    Enum(&'static [&'static str]),
}

impl OptionKind {
    fn check(&self, value: &OptionValue) -> Result<(), String> {
        match (self, value) {
            (OptionKind::Bool, OptionValue::Bool(_)) => Ok(()),
            (OptionKind::Int, OptionValue::Int(_)) => Ok(()),
            (OptionKind::Str, OptionValue::Str(_)) => Ok(()),
            (OptionKind::Enum(allowed), OptionValue::Str(s)) => {
                if allowed.contains(&s.as_str()) {
                    Ok(())
                } else {
                    Err(format!(
                        "expected one of {}, got '{}'",
                        allowed.join(", "),
                        s
                    ))
                }
            }
            (kind, value) => Err(format!(
                "expected {}, got {} '{}'",
                kind.expected_name(),
                value.type_name(),
                value
            )),
        }
    }

    fn expected_name(&self) -> &'static str {
        match self {
            OptionKind::Bool => "bool",
            OptionKind::Int => "integer",
            OptionKind::Str => "string",
            OptionKind::Enum(_) => "string",
        }
    }
}

/// Declared option of a rule: name plus allowed value type.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
}

/// Resolved state of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSettings {
    pub enabled: bool,
    pub options: BTreeMap<String, OptionValue>,
}

/// The effective rule set produced by [`resolve_config`].
///
/// Read-only during evaluation. `BTreeMap` keeps resolution deterministic:
/// identical inputs always yield an identical map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResolvedConfig {
    rules: BTreeMap<String, RuleSettings>,
}

impl ResolvedConfig {
    /// Check whether a rule is enabled. Unregistered codes are disabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.rules.get(code).map(|r| r.enabled).unwrap_or(false)
    }

    /// Resolved options for a rule (empty when none were set).
    pub fn options(&self, code: &str) -> RuleOptions<'_> {
        match self.rules.get(code) {
            Some(settings) => RuleOptions(Some(&settings.options)),
            None => RuleOptions(None),
        }
    }

    /// Iterate over all rule codes with their settings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSettings)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Read-only view of one rule's resolved options, with typed accessors.
#[derive(Debug, Clone, Copy)]
pub struct RuleOptions<'a>(Option<&'a BTreeMap<String, OptionValue>>);

impl<'a> RuleOptions<'a> {
    /// An empty option set, useful in tests.
    pub fn empty() -> Self {
        RuleOptions(None)
    }

    pub fn get(&self, name: &str) -> Option<&'a OptionValue> {
        self.0.and_then(|m| m.get(name))
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(OptionValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(OptionValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&'a str> {
        match self.get(name) {
            Some(OptionValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Configuration-time errors. All are fail-fast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown rule code '{0}'")]
    UnknownRuleCode(String),

    #[error("duplicate rule code '{0}'")]
    DuplicateRuleCode(String),

    #[error("invalid value for option '{option}' of rule {code}: {reason}")]
    InvalidOptionValue {
        code: String,
        option: String,
        reason: String,
    },
}

/// Merge a base policy with an ordered directive sequence into the effective
/// rule set. Fails on the first invalid directive.
pub fn resolve_config(
    registry: &Registry,
    base: BasePolicy,
    directives: &[Directive],
) -> Result<ResolvedConfig, ConfigError> {
    let mut rules: BTreeMap<String, RuleSettings> = BTreeMap::new();

    for rule in registry.rules() {
        let enabled = match base {
            BasePolicy::AllEnabled => true,
            BasePolicy::AllDisabled => false,
            BasePolicy::Default => rule.enabled_by_default(),
        };
        rules.insert(
            rule.code().to_string(),
            RuleSettings {
                enabled,
                options: BTreeMap::new(),
            },
        );
    }

    for directive in directives {
        match directive {
            Directive::Enable(code) => {
                registry.get(code)?;
                if let Some(settings) = rules.get_mut(code) {
                    settings.enabled = true;
                }
            }
            Directive::SetStyle {
                code,
                option,
                value,
            } => {
                let rule = registry.get(code)?;
                let spec = rule
                    .options()
                    .iter()
                    .find(|s| s.name == option)
                    .ok_or_else(|| ConfigError::InvalidOptionValue {
                        code: code.clone(),
                        option: option.clone(),
                        reason: format!("rule {} has no such option", code),
                    })?;
                spec.kind
                    .check(value)
                    .map_err(|reason| ConfigError::InvalidOptionValue {
                        code: code.clone(),
                        option: option.clone(),
                        reason,
                    })?;
                if let Some(settings) = rules.get_mut(code) {
                    settings.enabled = true;
                    settings.options.insert(option.clone(), value.clone());
                }
            }
            Directive::Exclude(code) => {
                registry.get(code)?;
                if let Some(settings) = rules.get_mut(code) {
                    settings.enabled = false;
                }
            }
        }
    }

    Ok(ResolvedConfig { rules })
}
