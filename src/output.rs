//! Console output for the `run` and `report` commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::models::{AuditOutcome, ReportSummary};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

fn print_json(v: &JsonVal) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

fn failure_text(o: &AuditOutcome) -> String {
    match (o.degraded, o.persisted) {
        (true, true) => format!("audit failed; empty results written to {}", o.results),
        (true, false) => format!("audit failed; results could not be written to {}", o.results),
        _ => format!(
            "found {} accessibility violations but results could not be written to {}",
            o.violations, o.results
        ),
    }
}

/// Print one line per audited target plus a summary.
pub fn print_audits(outcomes: &[AuditOutcome], output: &str) {
    match output {
        "json" => print_json(&compose_audits_json(outcomes)),
        _ => {
            let color = use_colors(output);
            for o in outcomes {
                if o.failed() {
                    let head = if color {
                        format!("{} {}", "✖".red(), o.name.bold())
                    } else {
                        format!("✖ {}", o.name)
                    };
                    println!("{} {} — {}", head, o.url, failure_text(o));
                    if let Some(err) = &o.error {
                        println!("    {}", err);
                    }
                } else {
                    let head = if color {
                        format!("{} {}", "✔".green(), o.name.bold())
                    } else {
                        format!("✔ {}", o.name)
                    };
                    println!(
                        "{} {} — found {} accessibility violations ({})",
                        head, o.url, o.violations, o.results
                    );
                }
            }
            let summary = format!(
                "— Summary — audited={} failed={} violations={}",
                outcomes.len(),
                outcomes.iter().filter(|o| o.failed()).count(),
                outcomes.iter().map(|o| o.violations).sum::<usize>()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print where the report went and the per-section counts.
pub fn print_report(summary: &ReportSummary, output: &str) {
    match output {
        "json" => print_json(&compose_report_json(summary)),
        _ => {
            let color = use_colors(output);
            for s in &summary.sections {
                let count = if color && s.violations > 0 {
                    s.violations.red().bold().to_string()
                } else if color {
                    s.violations.green().to_string()
                } else {
                    s.violations.to_string()
                };
                println!(
                    "  {} violations={} passes={} incomplete={}",
                    s.name, count, s.passes, s.incomplete
                );
            }
            if color {
                println!(
                    "{} {}",
                    "✅ HTML report generated at".green().bold(),
                    summary.output
                );
            } else {
                println!("✅ HTML report generated at {}", summary.output);
            }
        }
    }
}

/// Compose audit JSON object (pure) for testing purposes.
pub fn compose_audits_json(outcomes: &[AuditOutcome]) -> JsonVal {
    let summary = json!({
        "audited": outcomes.len(),
        "failed": outcomes.iter().filter(|o| o.failed()).count(),
        "violations": outcomes.iter().map(|o| o.violations).sum::<usize>(),
    });
    json!({"results": outcomes, "summary": summary})
}

/// Compose report JSON object (pure) for testing purposes.
pub fn compose_report_json(summary: &ReportSummary) -> JsonVal {
    let totals = json!({
        "sections": summary.sections.len(),
        "violations": summary.sections.iter().map(|s| s.violations).sum::<usize>(),
    });
    json!({"output": summary.output, "results": summary.sections, "summary": totals})
}
