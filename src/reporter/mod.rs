//! Ordering, deduplication, and output of lint results.

mod json;
mod text;

use crate::linter::Violation;
use std::path::Path;

/// Violations prepared for output: sorted and deduplicated.
///
/// Sorting is by line, then rule code, then column, then message, so two
/// runs over the same input always print identically regardless of the
/// order the engine produced them in.
#[derive(Debug, Clone)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub fn collect(mut violations: Vec<Violation>) -> Self {
        violations.sort_by(|a, b| {
            a.line
                .cmp(&b.line)
                .then_with(|| a.rule.cmp(&b.rule))
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.message.cmp(&b.message))
        });
        violations.dedup();
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    pub fn with_color(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn print(&self, report: &Report, path: &Path) {
        match self.format {
            OutputFormat::Text => text::report(report, path, self.color),
            OutputFormat::Json => json::report(report, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: &str, line: usize, column: Option<usize>) -> Violation {
        let mut v = Violation::new(rule, "some-name", "message", line);
        v.column = column;
        v
    }

    #[test]
    fn test_collect_sorts_by_line_then_code() {
        let report = Report::collect(vec![
            violation("MD033", 5, None),
            violation("MD013", 5, Some(81)),
            violation("MD047", 2, None),
        ]);
        let order: Vec<(usize, &str)> = report
            .violations()
            .iter()
            .map(|v| (v.line, v.rule.as_str()))
            .collect();
        assert_eq!(order, vec![(2, "MD047"), (5, "MD013"), (5, "MD033")]);
    }

    #[test]
    fn test_collect_dedups_identical_violations() {
        let report = Report::collect(vec![
            violation("MD013", 3, Some(81)),
            violation("MD013", 3, Some(81)),
        ]);
        assert_eq!(report.count(), 1);
    }

    #[test]
    fn test_collect_keeps_distinct_violations_on_same_line() {
        let report = Report::collect(vec![
            violation("MD013", 3, Some(81)),
            violation("MD013", 3, Some(101)),
        ]);
        assert_eq!(report.count(), 2);
    }
}
