//! axecheck core library.
//!
//! Runs accessibility audits against target pages through an external rule
//! engine and renders the saved results into one self-contained HTML report.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `audit`: Sequential audit runner with degraded fallback on failure.
//! - `report`: Load saved results, render, and write the report.
//! - `render`: HTML fragments for summaries, violations, and nodes.
//! - `tabs`: Tab state shared by the renderer and the inline script.
//! - `escape`: HTML escaping for untrusted text.
//! - `models`: Result set, report, and outcome data models.
//! - `output`: Human/JSON printers for run and report.
//! - `utils`: Supporting helpers.
pub mod audit;
pub mod cli;
pub mod config;
pub mod escape;
pub mod models;
pub mod output;
pub mod render;
pub mod report;
pub mod tabs;
pub mod utils;
