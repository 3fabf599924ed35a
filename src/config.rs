//! Configuration discovery and effective settings resolution.
//!
//! axecheck reads `axecheck.toml|yaml|yml` from the project root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `report`: `accessibility-report.html`
//! - `title`: `Accessibility Test Report`
//! - `engine.command`: `npx @axe-core/cli {url} --stdout`
//! - `targets`: the `issues` and `fixed` demo pages on `localhost:3000`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::report::DEFAULT_TITLE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["axecheck.toml", "axecheck.yaml", "axecheck.yml"];
pub const DEFAULT_REPORT: &str = "accessibility-report.html";
pub const DEFAULT_COMMAND: [&str; 4] = ["npx", "@axe-core/cli", "{url}", "--stdout"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Audit collaborator settings under `[engine]`.
pub struct EngineCfg {
    /// Argument template; `{url}` is replaced by the target URL.
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
/// One `[[targets]]` entry.
pub struct TargetCfg {
    pub name: String,
    pub url: String,
    pub label: Option<String>,
    pub heading: Option<String>,
    pub results: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `axecheck.toml|yaml`.
pub struct AxecheckConfig {
    pub output: Option<String>,
    pub report: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub engine: Option<EngineCfg>,
    #[serde(default)]
    pub targets: Option<Vec<TargetCfg>>,
}

#[derive(Debug, Clone, PartialEq)]
/// A page to audit and the section it becomes in the report.
pub struct Target {
    pub name: String,
    pub label: String,
    pub heading: String,
    pub url: String,
    pub results: PathBuf,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: String,
    pub report: PathBuf,
    pub title: String,
    pub command: Vec<String>,
    pub targets: Vec<Target>,
}

/// Built-in targets: the locally served issues/fixed demo pair.
pub fn default_targets() -> Vec<TargetCfg> {
    [("issues", "Issues Demo"), ("fixed", "Fixed Demo")]
        .into_iter()
        .map(|(name, label)| TargetCfg {
            name: name.to_string(),
            url: format!("http://localhost:3000/accessibility-{}-demo.html", name),
            label: Some(label.to_string()),
            heading: Some(format!("{} Page", label)),
            results: Some(format!("accessibility-{}-results.json", name)),
        })
        .collect()
}

/// Fill labels and paths left unset in a target entry.
fn resolve_target(root: &Path, t: TargetCfg) -> Target {
    let label = t.label.unwrap_or_else(|| title_case(&t.name));
    let heading = t.heading.unwrap_or_else(|| label.clone());
    let results = t
        .results
        .unwrap_or_else(|| format!("accessibility-{}-results.json", t.name));
    Target {
        results: root.join(results),
        name: t.name,
        label,
        heading,
        url: t.url,
    }
}

/// Keep target names unique: a repeated name gets the first free `-N`
/// suffix, starting at 2. Names key tab ids and default results paths.
fn unique_names(targets: Vec<TargetCfg>) -> Vec<TargetCfg> {
    let mut seen: Vec<String> = Vec::with_capacity(targets.len());
    let mut out = Vec::with_capacity(targets.len());
    for mut t in targets {
        if seen.contains(&t.name) {
            let renamed = (2..)
                .map(|n| format!("{}-{}", t.name, n))
                .find(|candidate| !seen.contains(candidate))
                .unwrap_or_else(|| t.name.clone());
            tracing::warn!(name = %t.name, renamed = %renamed, "duplicate target name");
            t.name = renamed;
        }
        seen.push(t.name.clone());
        out.push(t);
    }
    out
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when an `axecheck.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `AxecheckConfig` from the first config file present under `root`.
///
/// A file that exists but fails to parse is logged and treated as absent.
pub fn load_config(root: &Path) -> Option<AxecheckConfig> {
    for name in CONFIG_FILES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = fs::read_to_string(&p).ok()?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<AxecheckConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<AxecheckConfig>(&s).map_err(|e| e.to_string())
        };
        return match parsed {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "ignoring invalid config file");
                None
            }
        };
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_output: Option<&str>,
    cli_report: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let report = root.join(
        cli_report
            .map(|s| s.to_string())
            .or(cfg.report)
            .unwrap_or_else(|| DEFAULT_REPORT.to_string()),
    );

    let title = cfg.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let command = cfg
        .engine
        .and_then(|e| e.command)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect());

    let targets: Vec<Target> = unique_names(
        cfg.targets
            .filter(|t| !t.is_empty())
            .unwrap_or_else(default_targets),
    )
    .into_iter()
    .map(|t| resolve_target(&root, t))
    .collect();
    for (i, t) in targets.iter().enumerate() {
        if targets[..i].iter().any(|prev| prev.results == t.results) {
            tracing::warn!(
                page = %t.name,
                path = %t.results.display(),
                "results path shared with an earlier target; it will be overwritten"
            );
        }
    }

    Effective {
        root,
        output,
        report,
        title,
        command,
        targets,
    }
}
