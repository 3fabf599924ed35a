//! axecheck CLI binary entry point.
//! Resolves configuration, delegates to the audit/report modules, and prints results.

use anyhow::{Context, Result};
use axecheck::audit::{self, CommandEngine};
use axecheck::cli::{Cli, Commands, CommonArgs};
use axecheck::config::{self, Effective};
use axecheck::report::{self, ReportInput};
use axecheck::{output, utils};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(utils::colors_enabled())
        .init();
}

fn resolve(common: &CommonArgs) -> Effective {
    let eff = config::resolve_effective(
        common.root.as_deref(),
        common.output.as_deref(),
        common.report.as_deref(),
    );
    // Friendly note if no config was found
    if eff.output != "json" && config::load_config(&eff.root).is_none() {
        eprintln!(
            "{} No axecheck.toml found; using default targets.",
            utils::note_prefix()
        );
    }
    eff
}

/// Audit every target; failures are already folded into degraded results.
fn run_audits(eff: &Effective) {
    if eff.output != "json" {
        eprintln!(
            "{} Auditing {} target(s) with `{}`",
            utils::info_prefix(),
            eff.targets.len(),
            eff.command.join(" ")
        );
    }
    let engine = CommandEngine::new(eff.command.clone()).current_dir(&eff.root);
    let outcomes = audit::run_all(&engine, &eff.targets);
    output::print_audits(&outcomes, &eff.output);
}

fn write_report(eff: &Effective) -> Result<()> {
    let inputs: Vec<ReportInput> = eff.targets.iter().map(ReportInput::from).collect();
    let summary = report::generate(&inputs, &eff.report, &eff.title)
        .with_context(|| format!("could not generate {}", eff.report.display()))?;
    output::print_report(&summary, &eff.output);
    Ok(())
}

fn report_or_exit(eff: &Effective) {
    if let Err(e) = write_report(eff) {
        eprintln!("{} {:#}", utils::error_prefix(), e);
        std::process::exit(1);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.cmd.common().is_some_and(|c| c.verbose));
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Run { common } => {
            let eff = resolve(&common);
            run_audits(&eff);
        }
        Commands::Report { common } => {
            let eff = resolve(&common);
            report_or_exit(&eff);
        }
        Commands::All { common } => {
            let eff = resolve(&common);
            run_audits(&eff);
            report_or_exit(&eff);
        }
    }
}
