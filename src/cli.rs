//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "axecheck",
    version,
    about = "Accessibility audits and a tabbed HTML report",
    long_about = "axecheck — audit web pages with the axe rule engine and render a single, self-contained HTML report comparing the results.\n\nConfiguration precedence: CLI > axecheck.toml > defaults.",
    after_help = "Examples:\n  axecheck all\n  axecheck run --output json\n  axecheck report --report out/a11y.html",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Debug, Default)]
/// Flags shared by every command that touches the project.
pub struct CommonArgs {
    #[arg(long, help = "Project root (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Report path (default: accessibility-report.html)")]
    pub report: Option<String>,
    #[arg(long, short = 'v', action = clap::ArgAction::SetTrue, help = "Log audit progress to stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current axecheck version.")]
    Version,
    /// Audit each configured target
    #[command(
        about = "Run accessibility audits",
        long_about = "Audit every target page in order and write one JSON result file per target. A failed audit writes an empty result set and the run continues.",
        after_help = "Examples:\n  axecheck run\n  axecheck run --output json"
    )]
    Run {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Render the HTML report from saved results
    #[command(
        about = "Generate the HTML report",
        long_about = "Read the saved result files and write one self-contained HTML report with a tab per target.",
        after_help = "Examples:\n  axecheck report\n  axecheck report --report out/a11y.html"
    )]
    Report {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Audit, then render the report
    #[command(
        about = "Run audits and generate the report",
        long_about = "Equivalent to `axecheck run` followed by `axecheck report`."
    )]
    All {
        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Commands {
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Commands::Version => None,
            Commands::Run { common } | Commands::Report { common } | Commands::All { common } => {
                Some(common)
            }
        }
    }
}
