//! Report model: named result sets plus a generation timestamp.

use super::results::ResultSet;
use chrono::{DateTime, Local};

pub const DEFAULT_TITLE: &str = "Accessibility Test Report";

#[derive(Debug, Clone)]
/// One named result set; rendered as one tab.
pub struct Section {
    /// Tab id; also the panel element id.
    pub name: String,
    /// Tab button text, e.g. "Issues Demo".
    pub label: String,
    /// Panel heading, e.g. "Issues Demo Page".
    pub heading: String,
    pub results: ResultSet,
}

impl Section {
    pub fn new(name: &str, label: &str, heading: &str, results: ResultSet) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            heading: heading.to_string(),
            results,
        }
    }
}

#[derive(Debug, Clone)]
/// Built once per invocation and discarded after rendering.
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Local>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            generated_at: Local::now(),
            sections,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Date line shown in the report header.
    pub fn date_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d").to_string()
    }
}
