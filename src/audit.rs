//! Audit runner: drives the rule engine against each target URL and
//! persists one result file per target.
//!
//! Failures never propagate. A target whose audit cannot run gets an empty
//! `ResultSet` written in place of real results, and the next target still
//! runs. Targets are processed strictly one after another.

use crate::config::Target;
use crate::models::{AuditOutcome, ResultSet};
use serde_json::Value as Json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to start audit command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("audit command exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("audit command produced no results")]
    EmptyOutput,
    #[error("audit output is not a valid result set: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The external rule engine: loads `url` in a browser, waits for the page
/// to settle, and returns the raw result set.
pub trait AuditEngine {
    fn analyze(&self, url: &str) -> Result<ResultSet, AuditError>;
}

/// Runs an external command and parses its stdout.
///
/// The argument template is taken verbatim except that every `{url}` is
/// replaced with the target URL. Stdout may hold a single result object or
/// an array of them, as the axe CLI prints; the first entry is used.
pub struct CommandEngine {
    argv: Vec<String>,
    cwd: Option<PathBuf>,
}

impl CommandEngine {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv, cwd: None }
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    fn args_for(&self, url: &str) -> Vec<String> {
        self.argv.iter().map(|a| a.replace("{url}", url)).collect()
    }
}

impl AuditEngine for CommandEngine {
    fn analyze(&self, url: &str) -> Result<ResultSet, AuditError> {
        let args = self.args_for(url);
        let (program, rest) = args.split_first().ok_or(AuditError::EmptyOutput)?;
        let mut cmd = Command::new(program);
        cmd.args(rest);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        debug!(?args, "running audit command");
        let out = cmd.output().map_err(|source| AuditError::Spawn {
            program: program.clone(),
            source,
        })?;
        if !out.status.success() {
            return Err(AuditError::Exit {
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        parse_output(&out.stdout)
    }
}

/// Parse engine stdout: a result object, or an array whose first element is one.
pub fn parse_output(stdout: &[u8]) -> Result<ResultSet, AuditError> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(AuditError::EmptyOutput);
    }
    let value: Json = serde_json::from_slice(stdout)?;
    let first = match value {
        Json::Array(items) => items.into_iter().next().ok_or(AuditError::EmptyOutput)?,
        other => other,
    };
    Ok(serde_json::from_value(first)?)
}

/// Write a result set as pretty JSON, replacing any existing file.
pub fn write_results(path: &Path, results: &ResultSet) -> Result<(), AuditError> {
    let write_err = |source| AuditError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let body = serde_json::to_string_pretty(results)?;
    fs::write(path, body).map_err(write_err)
}

/// Audit one target and persist its results. Never fails: on error the
/// degraded (empty) result set is written and returned. A failed write is
/// logged and recorded on the outcome.
pub fn run_audit(engine: &dyn AuditEngine, target: &Target) -> ResultSet {
    run_target(engine, target).0
}

fn run_target(engine: &dyn AuditEngine, target: &Target) -> (ResultSet, AuditOutcome) {
    info!(page = %target.name, url = %target.url, "testing for accessibility issues");
    let (results, error) = match engine.analyze(&target.url) {
        Ok(rs) => {
            info!(
                page = %target.name,
                violations = rs.violation_count(),
                "audit completed"
            );
            (rs, None)
        }
        Err(e) => {
            warn!(page = %target.name, url = %target.url, error = %e, "audit failed; writing empty results");
            (ResultSet::degraded(), Some(e.to_string()))
        }
    };
    let degraded = error.is_some();
    let (persisted, error) = match write_results(&target.results, &results) {
        Ok(()) => {
            debug!(path = %target.results.display(), "results saved");
            (true, error)
        }
        Err(e) => {
            warn!(page = %target.name, error = %e, "could not persist results");
            let msg = match error {
                Some(audit_err) => format!("{}; {}", audit_err, e),
                None => e.to_string(),
            };
            (false, Some(msg))
        }
    };
    let outcome = AuditOutcome {
        name: target.name.clone(),
        url: target.url.clone(),
        results: target.results.to_string_lossy().to_string(),
        violations: results.violation_count(),
        degraded,
        persisted,
        error,
    };
    (results, outcome)
}

/// Audit every target in order; each runs regardless of earlier failures.
pub fn run_all(engine: &dyn AuditEngine, targets: &[Target]) -> Vec<AuditOutcome> {
    targets.iter().map(|t| run_target(engine, t).1).collect()
}
