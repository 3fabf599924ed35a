//! Report generation: load persisted result sets, render, write HTML.
//!
//! Input files are trusted to be well-formed apart from missing
//! `passes`/`incomplete`. Anything else aborts with a `ReportError` naming
//! the offending file; no partial report is written.

use crate::config::Target;
use crate::models::{Report, ReportSummary, ResultSet, Section, SectionSummary};
use crate::render::render_report;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid result set: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
/// One persisted result file and how its section is labelled.
pub struct ReportInput {
    pub name: String,
    pub label: String,
    pub heading: String,
    pub path: PathBuf,
}

impl From<&Target> for ReportInput {
    fn from(t: &Target) -> Self {
        Self {
            name: t.name.clone(),
            label: t.label.clone(),
            heading: t.heading.clone(),
            path: t.results.clone(),
        }
    }
}

/// Read one result file.
pub fn load_results(path: &Path) -> Result<ResultSet, ReportError> {
    let data = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every input, in order, into a report.
pub fn build_report(inputs: &[ReportInput], title: &str) -> Result<Report, ReportError> {
    let sections = inputs
        .iter()
        .map(|i| {
            load_results(&i.path).map(|rs| Section::new(&i.name, &i.label, &i.heading, rs))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Report::new(sections).with_title(title))
}

/// Build, render and write the report to `output`, replacing any existing file.
pub fn generate(
    inputs: &[ReportInput],
    output: &Path,
    title: &str,
) -> Result<ReportSummary, ReportError> {
    let report = build_report(inputs, title)?;
    let html = render_report(&report);
    let write_err = |source| ReportError::Write {
        path: output.to_path_buf(),
        source,
    };
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output, html).map_err(write_err)?;
    info!(path = %output.display(), sections = report.sections.len(), "report written");

    Ok(ReportSummary {
        output: output.to_string_lossy().to_string(),
        sections: report
            .sections
            .iter()
            .map(|s| SectionSummary {
                name: s.name.clone(),
                violations: s.results.violation_count(),
                passes: s.results.pass_count(),
                incomplete: s.results.incomplete_count(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NO_VIOLATIONS_MESSAGE;
    use tempfile::tempdir;

    fn input(dir: &Path, name: &str, label: &str) -> ReportInput {
        ReportInput {
            name: name.into(),
            label: label.into(),
            heading: format!("{label} Page"),
            path: dir.join(format!("accessibility-{name}-results.json")),
        }
    }

    #[test]
    fn test_generate_two_sections() {
        let dir = tempdir().unwrap();
        let issues = input(dir.path(), "issues", "Issues Demo");
        let fixed = input(dir.path(), "fixed", "Fixed Demo");
        fs::write(
            &issues.path,
            r#"{"violations":[{"id":"image-alt","help":"Images must have alternate text","impact":"critical","description":"d","helpUrl":"https://x","nodes":[{"html":"<img src=\"a.png\">","failureSummary":"Fix any of the following"}]}],"passes":[{},{}]}"#,
        )
        .unwrap();
        fs::write(&fixed.path, r#"{"violations":[]}"#).unwrap();

        let out = dir.path().join("out/accessibility-report.html");
        let summary = generate(&[issues, fixed], &out, "Accessibility Test Report").unwrap();

        let html = fs::read_to_string(&out).unwrap();
        assert!(html.contains("image-alt: Images must have alternate text"));
        assert!(html.contains("&lt;img src=&quot;a.png&quot;&gt;"));
        assert!(html.contains("<p class=\"failure-summary\">Fix any of the following</p>"));
        assert_eq!(html.matches(NO_VIOLATIONS_MESSAGE).count(), 1);
        assert_eq!(summary.sections.len(), 2);
        assert_eq!(summary.sections[0].violations, 1);
        assert_eq!(summary.sections[0].passes, 2);
        assert_eq!(summary.sections[1].incomplete, 0);
    }

    #[test]
    fn test_existing_report_is_replaced() {
        let dir = tempdir().unwrap();
        let fixed = input(dir.path(), "fixed", "Fixed Demo");
        fs::write(&fixed.path, r#"{"violations":[],"passes":[],"incomplete":[]}"#).unwrap();
        let out = dir.path().join("report.html");
        fs::write(&out, "old report").unwrap();
        generate(&[fixed], &out, "T").unwrap();
        let html = fs::read_to_string(&out).unwrap();
        assert!(!html.contains("old report"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_missing_input_aborts_without_output() {
        let dir = tempdir().unwrap();
        let issues = input(dir.path(), "issues", "Issues Demo");
        let out = dir.path().join("report.html");
        let err = generate(&[issues], &out, "T").unwrap_err();
        assert!(matches!(err, ReportError::Read { .. }));
        assert!(err.to_string().contains("accessibility-issues-results.json"));
        assert!(!out.exists());
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let issues = input(dir.path(), "issues", "Issues Demo");
        fs::write(&issues.path, r#"{"passes": []}"#).unwrap();
        let err = build_report(&[issues], "T").unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
    }

    #[test]
    fn test_input_from_target() {
        let t = Target {
            name: "fixed".into(),
            label: "Fixed Demo".into(),
            heading: "Fixed Demo Page".into(),
            url: "http://localhost:3000/accessibility-fixed-demo.html".into(),
            results: PathBuf::from("accessibility-fixed-results.json"),
        };
        let i = ReportInput::from(&t);
        assert_eq!(i.name, "fixed");
        assert_eq!(i.path, PathBuf::from("accessibility-fixed-results.json"));
    }
}
