use super::Report;
use crate::linter::Violation;
use std::path::Path;

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    file: String,
    violations: &'a [Violation],
    summary: Summary,
}

#[derive(serde::Serialize)]
struct Summary {
    violations: usize,
}

pub(crate) fn report(report: &Report, path: &Path) {
    println!("{}", format(report, path));
}

pub(crate) fn format(report: &Report, path: &Path) -> String {
    let out = JsonReport {
        file: path.display().to_string(),
        violations: report.violations(),
        summary: Summary {
            violations: report.count(),
        },
    };
    serde_json::to_string_pretty(&out).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_structure() {
        let report = Report::collect(vec![
            Violation::new("MD013", "line-length", "line length 85 exceeds 80 characters", 3)
                .with_column(81),
        ]);
        let output = format(&report, Path::new("README.md"));
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["file"], "README.md");
        assert_eq!(json["violations"].as_array().unwrap().len(), 1);
        assert_eq!(json["violations"][0]["rule"], "MD013");
        assert_eq!(json["violations"][0]["name"], "line-length");
        assert_eq!(json["violations"][0]["line"], 3);
        assert_eq!(json["violations"][0]["column"], 81);
        assert_eq!(json["summary"]["violations"], 1);
    }

    #[test]
    fn test_json_omits_missing_column() {
        let report = Report::collect(vec![Violation::new(
            "MD024",
            "no-duplicate-heading",
            "duplicate heading",
            9,
        )]);
        let output = format(&report, Path::new("README.md"));
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["violations"][0].get("column").is_none());
    }

    #[test]
    fn test_json_empty_report() {
        let report = Report::collect(vec![]);
        let output = format(&report, Path::new("README.md"));
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["violations"].as_array().unwrap().is_empty());
        assert_eq!(json["summary"]["violations"], 0);
    }
}
