//! Audit result schema as emitted by the axe rule engine.
//!
//! Only the fields the report needs are typed. `passes` and `incomplete`
//! stay as raw JSON since only their counts are shown. Missing sequences
//! deserialize to empty ones. Keys the report does not use (`url`,
//! `testEngine`, `tags`, ...) are kept in `extra` so saved results match
//! what the engine produced.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::fmt;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
/// Full output of one audit.
pub struct ResultSet {
    pub violations: Vec<Violation>,
    #[serde(default)]
    pub passes: Vec<Json>,
    #[serde(default)]
    pub incomplete: Vec<Json>,
    /// Remaining engine fields, written back unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

impl ResultSet {
    /// Placeholder written when an audit could not run.
    pub fn degraded() -> Self {
        Self::default()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn incomplete_count(&self) -> usize {
        self.incomplete.len()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
/// A failed rule and the elements it matched.
pub struct Violation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: Option<Impact>,
    #[serde(default, rename = "helpUrl")]
    pub help_url: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
/// One affected page element.
pub struct Node {
    #[serde(default)]
    pub html: String,
    #[serde(default, rename = "failureSummary")]
    pub failure_summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

impl Node {
    pub fn new(html: &str, failure_summary: Option<&str>) -> Self {
        Self {
            html: html.to_string(),
            failure_summary: failure_summary.map(str::to_string),
            ..Default::default()
        }
    }

    /// Failure summary worth rendering: present and non-empty.
    pub fn summary(&self) -> Option<&str> {
        self.failure_summary.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
/// Impact levels reported by the rule engine.
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
