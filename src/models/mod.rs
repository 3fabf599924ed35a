//! Shared data models: audit results, the derived report, and per-target
//! outcome records used by printers.

pub mod report;
pub mod results;

pub use report::{Report, Section};
pub use results::{Impact, Node, ResultSet, Violation};

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// Outcome of auditing one target.
pub struct AuditOutcome {
    pub name: String,
    pub url: String,
    pub results: String,
    pub violations: usize,
    /// True when the audit failed and an empty result set was written.
    pub degraded: bool,
    /// False when the results file could not be written.
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditOutcome {
    /// Audit failed or its results never reached disk.
    pub fn failed(&self) -> bool {
        self.degraded || !self.persisted
    }
}

#[derive(Debug, Clone, Serialize)]
/// Per-section counts shown after a report is written.
pub struct SectionSummary {
    pub name: String,
    pub violations: usize,
    pub passes: usize,
    pub incomplete: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Result of a report generation run.
pub struct ReportSummary {
    pub output: String,
    pub sections: Vec<SectionSummary>,
}
