use super::Report;
use crate::linter::Violation;
#[cfg(feature = "cli")]
use colored::Colorize;
use std::path::Path;

pub(crate) fn report(report: &Report, path: &Path, color: bool) {
    let path_str = path.display();

    for violation in report.violations() {
        let location = match violation.column {
            Some(col) => format!("{}:{}:{}", path_str, violation.line, col),
            None => format!("{}:{}", path_str, violation.line),
        };
        println!(
            "{}: {}: {}",
            location,
            paint_code(violation, color),
            violation.message
        );
    }

    if !report.is_empty() {
        println!();
        println!("Found {} violation(s)", report.count());
    }
}

#[cfg(feature = "cli")]
fn paint_code(violation: &Violation, color: bool) -> String {
    let label = format!("{}[{}]", violation.rule, violation.name);
    if color {
        label.yellow().bold().to_string()
    } else {
        label
    }
}

#[cfg(not(feature = "cli"))]
fn paint_code(violation: &Violation, _color: bool) -> String {
    format!("{}[{}]", violation.rule, violation.name)
}

#[cfg(test)]
fn format_line(violation: &Violation, path: &Path) -> String {
    let path_str = path.display();
    let location = match violation.column {
        Some(col) => format!("{}:{}:{}", path_str, violation.line, col),
        None => format!("{}:{}", path_str, violation.line),
    };
    format!(
        "{}: {}[{}]: {}",
        location, violation.rule, violation.name, violation.message
    )
}
