pub mod config;
pub mod linter;
pub mod parser;
pub mod registry;
pub mod reporter;
pub mod rules;
pub mod style;

pub use config::{resolve_config, BasePolicy, ConfigError, Directive, OptionValue, ResolvedConfig};
pub use linter::{Linter, Rule, Violation, RULE_FAULT_CODE};
pub use parser::{parse_document, parse_file};
pub use registry::Registry;
pub use reporter::{OutputFormat, Report, Reporter};
pub use style::{load_style, parse_style, StyleError, StyleFile};

use std::io;
use std::path::Path;

/// Lint a single file with an already-resolved configuration.
///
/// Reads and parses the file, runs every enabled rule, and returns the
/// sorted, deduplicated report. Only reading the file can fail; parsing
/// accepts any text.
pub fn lint_path(registry: &Registry, config: &ResolvedConfig, path: &Path) -> io::Result<Report> {
    let document = parse_file(path)?;
    let linter = Linter::new(registry);
    Ok(Report::collect(linter.lint(&document, config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lint_path_end_to_end() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Title\n\n{}\n", "x".repeat(85)).unwrap();

        let registry = Registry::builtin();
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &[]).unwrap();
        let report = lint_path(&registry, &config, file.path()).unwrap();

        assert!(report.violations().iter().any(|v| v.rule == "MD013"));
    }

    #[test]
    fn test_lint_path_missing_file() {
        let registry = Registry::builtin();
        let config = resolve_config(&registry, BasePolicy::AllEnabled, &[]).unwrap();
        let result = lint_path(&registry, &config, Path::new("/no/such/file.md"));
        assert!(result.is_err());
    }
}
