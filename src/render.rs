//! HTML report rendering.
//!
//! Produces one self-contained document (inline CSS and script) with a tab
//! per section. Every text field taken from audit output goes through
//! `escape` before it is embedded.

use crate::escape::escape;
use crate::models::{Node, Report, ResultSet, Section, Violation};
use crate::tabs::{self, TabController};

pub const NO_VIOLATIONS_MESSAGE: &str = "No accessibility violations found! 🎉";

/// Render the full report document.
pub fn render_report(report: &Report) -> String {
    let tab_state = TabController::new(report.sections.len());
    let is_active = |idx: usize| tab_state.is_some_and(|t| t.is_active(idx));

    let buttons: String = report
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| render_tab_button(s, is_active(i)))
        .collect();
    let panels: String = report
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| render_panel(s, is_active(i)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{css}</style>
</head>
<body>
  <div class="report-header">
    <h1>{title}</h1>
    <p><strong>Date:</strong> {date}</p>
  </div>

  <div class="tabs">
{buttons}  </div>
{panels}
  <script>{js}</script>
</body>
</html>
"#,
        title = escape(&report.title),
        date = report.date_label(),
        css = inline_css(),
        js = tabs::inline_script(),
        buttons = buttons,
        panels = panels,
    )
}

fn active_class(base: &str, active: bool) -> String {
    if active {
        format!("{} active", base)
    } else {
        base.to_string()
    }
}

fn render_tab_button(section: &Section, active: bool) -> String {
    format!(
        "    <button class=\"{}\" data-tab=\"{}\">{}</button>\n",
        active_class("tab", active),
        escape(&section.name),
        escape(&section.label)
    )
}

/// Render one tab panel: heading, summary block, violations block.
pub fn render_panel(section: &Section, active: bool) -> String {
    format!(
        r#"
  <div id="{id}" class="{class}">
    <h2>{heading}</h2>
{summary}
{violations}
  </div>
"#,
        id = escape(&section.name),
        class = active_class("tab-content", active),
        heading = escape(&section.heading),
        summary = render_summary(&section.results),
        violations = render_violations(&section.results),
    )
}

/// Summary block with violation, pass and incomplete counts.
pub fn render_summary(results: &ResultSet) -> String {
    let count = results.violation_count();
    let status = if count > 0 { "failing" } else { "passing" };
    format!(
        r#"    <div class="summary-box">
      <h3>Summary</h3>
      <p><strong>Violations:</strong> <span class="{status}">{count}</span></p>
      <p><strong>Passes:</strong> {passes}</p>
      <p><strong>Incomplete:</strong> {incomplete}</p>
    </div>"#,
        status = status,
        count = count,
        passes = results.pass_count(),
        incomplete = results.incomplete_count(),
    )
}

/// Violations block; a single celebratory line when there are none.
pub fn render_violations(results: &ResultSet) -> String {
    if results.violations.is_empty() {
        return format!("    <p class=\"passing\">{}</p>", NO_VIOLATIONS_MESSAGE);
    }
    let mut s = String::new();
    s.push_str("    <div class=\"violations\">\n");
    s.push_str(&format!(
        "      <h3>Violations ({})</h3>\n",
        results.violation_count()
    ));
    for v in &results.violations {
        s.push_str(&render_violation(v));
    }
    s.push_str("    </div>");
    s
}

/// One violation: title, impact, description, help link, affected nodes.
pub fn render_violation(v: &Violation) -> String {
    let impact = v.impact.map(|i| i.as_str()).unwrap_or("none");
    let nodes: String = v.nodes.iter().map(render_node).collect();
    format!(
        r#"      <div class="violation">
        <h3>{id}: {help}</h3>
        <p><strong>Impact:</strong> <span class="impact impact-{impact}">{impact}</span></p>
        <p><strong>Description:</strong> {description}</p>
        <p><strong>Help:</strong> {help}</p>
        <p><a href="{help_url}" target="_blank" rel="noopener noreferrer">Learn more</a></p>
        <div class="nodes">
          <h4>Affected Elements ({count}):</h4>
{nodes}        </div>
      </div>
"#,
        id = escape(&v.id),
        help = escape(&v.help),
        impact = impact,
        description = escape(&v.description),
        help_url = escape(&v.help_url),
        count = v.nodes.len(),
        nodes = nodes,
    )
}

/// One affected element; the failure-summary callout only when present.
pub fn render_node(node: &Node) -> String {
    let callout = match node.summary() {
        Some(summary) => format!(
            "            <p class=\"failure-summary\">{}</p>\n",
            escape(summary)
        ),
        None => String::new(),
    };
    format!(
        r#"          <div class="violation-node">
            <h4>HTML Element:</h4>
            <pre class="code">{html}</pre>
{callout}          </div>
"#,
        html = escape(&node.html),
        callout = callout,
    )
}

fn inline_css() -> &'static str {
    r#"
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, 'Open Sans', 'Helvetica Neue', sans-serif;
      line-height: 1.6;
      max-width: 1200px;
      margin: 0 auto;
      padding: 20px;
      color: #333;
    }
    h1, h2 { border-bottom: 2px solid #eaecef; padding-bottom: 10px; }
    .report-header { display: flex; justify-content: space-between; align-items: center; }
    .summary-box {
      background-color: #f6f8fa;
      border: 1px solid #ddd;
      border-radius: 5px;
      padding: 15px;
      margin-bottom: 20px;
    }
    .passing { color: #28a745; }
    .failing { color: #dc3545; }
    .violations { margin-top: 30px; }
    .violation {
      background-color: #fff;
      border: 1px solid #e1e4e8;
      border-radius: 6px;
      padding: 16px;
      margin-bottom: 16px;
      box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    }
    .violation h3 { margin-top: 0; border-bottom: 1px solid #eaecef; padding-bottom: 8px; }
    .impact-critical, .impact-serious { color: #dc3545; font-weight: bold; }
    .impact-moderate { color: #b08800; }
    .violation-node { background-color: #f6f8fa; padding: 12px; border-radius: 6px; margin-bottom: 12px; }
    .code {
      background-color: #f6f8fa;
      border-radius: 3px;
      padding: 10px;
      overflow-x: auto;
      white-space: pre-wrap;
      word-break: break-all;
      font-family: SFMono-Regular, Consolas, 'Liberation Mono', Menlo, monospace;
      font-size: 85%;
    }
    .failure-summary { background-color: #ffe8e8; border-left: 3px solid #dc3545; padding: 8px 15px; white-space: pre-line; }
    .tabs { display: flex; margin-bottom: 20px; border-bottom: 1px solid #e1e4e8; }
    .tab {
      padding: 10px 20px;
      cursor: pointer;
      border: 1px solid transparent;
      border-bottom: none;
      margin-bottom: -1px;
      background-color: transparent;
      font: inherit;
    }
    .tab.active { border-color: #e1e4e8; border-bottom-color: white; background-color: white; font-weight: bold; }
    .tab-content { display: none; }
    .tab-content.active { display: block; }
    @media (max-width: 768px) { .report-header { flex-direction: column; } }
  "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;

    fn contrast_results() -> ResultSet {
        serde_json::from_str(
            r#"{"violations":[{"id":"color-contrast","help":"Elements must have sufficient contrast","impact":"serious","description":"...","helpUrl":"https://x","nodes":[{"html":"<p>hi</p>","failureSummary":null}]}],"passes":[],"incomplete":[]}"#,
        )
        .unwrap()
    }

    fn violation(id: &str) -> Violation {
        Violation {
            id: id.into(),
            help: format!("help for {id}"),
            description: "d".into(),
            impact: Some(Impact::Minor),
            help_url: "https://example.test".into(),
            nodes: vec![Node::new("<div></div>", Some("Fix this"))],
            ..Default::default()
        }
    }

    fn two_section_report(issues: ResultSet, fixed: ResultSet) -> Report {
        Report::new(vec![
            Section::new("issues", "Issues Demo", "Issues Demo Page", issues),
            Section::new("fixed", "Fixed Demo", "Fixed Demo Page", fixed),
        ])
    }

    #[test]
    fn test_color_contrast_scenario() {
        let panel = render_panel(
            &Section::new("issues", "Issues", "Issues", contrast_results()),
            true,
        );
        assert_eq!(panel.matches("class=\"violation\"").count(), 1);
        assert!(panel.contains("<h3>color-contrast: Elements must have sufficient contrast</h3>"));
        assert!(panel.contains(">serious</span>"));
        assert!(panel.contains("<pre class=\"code\">&lt;p&gt;hi&lt;/p&gt;</pre>"));
        assert!(!panel.contains("failure-summary"));
        assert!(panel.contains("Affected Elements (1):"));
        assert!(panel.contains("href=\"https://x\""));
    }

    #[test]
    fn test_zero_violations_renders_message_only() {
        let panel = render_panel(&Section::new("fixed", "F", "F", ResultSet::degraded()), false);
        assert!(panel.contains(NO_VIOLATIONS_MESSAGE));
        assert!(!panel.contains("class=\"violation\""));
        assert!(panel.contains("<span class=\"passing\">0</span>"));
        assert!(panel.contains("<strong>Passes:</strong> 0"));
        assert!(panel.contains("<strong>Incomplete:</strong> 0"));
    }

    #[test]
    fn test_violations_keep_input_order_without_dedup() {
        let rs = ResultSet {
            violations: vec![violation("zeta"), violation("alpha"), violation("zeta")],
            passes: vec![serde_json::json!({}); 4],
            incomplete: vec![serde_json::json!({})],
            ..Default::default()
        };
        let block = render_violations(&rs);
        assert_eq!(block.matches("class=\"violation\"").count(), 3);
        assert!(block.contains("Violations (3)"));
        let first = block.find("<h3>zeta").unwrap();
        let second = block.find("<h3>alpha").unwrap();
        assert!(first < second);
        let summary = render_summary(&rs);
        assert!(summary.contains("<span class=\"failing\">3</span>"));
        assert!(summary.contains("<strong>Passes:</strong> 4"));
        assert!(summary.contains("<strong>Incomplete:</strong> 1"));
    }

    #[test]
    fn test_callout_only_when_summary_present() {
        let with = render_node(&Node::new(
            "<b>",
            Some("Fix any of the following:\n  <missing> alt"),
        ));
        assert_eq!(with.matches("class=\"failure-summary\"").count(), 1);
        assert!(with.contains("&lt;missing&gt; alt"));
        let without = render_node(&Node::new("<b>", None));
        assert!(!without.contains("failure-summary"));
        let empty = render_node(&Node::new("<b>", Some("")));
        assert!(!empty.contains("failure-summary"));
    }

    #[test]
    fn test_empty_nodes_and_unset_impact() {
        let v = Violation {
            id: "region".into(),
            nodes: vec![],
            ..Default::default()
        };
        let out = render_violation(&v);
        assert!(out.contains("Affected Elements (0):"));
        assert!(out.contains(">none</span>"));
        assert!(!out.contains("violation-node"));
    }

    #[test]
    fn test_untrusted_fields_are_escaped() {
        let v = Violation {
            id: "<script>".into(),
            help: "a & b".into(),
            description: "\"quoted\"".into(),
            impact: Some(Impact::Critical),
            help_url: "https://x/\" onmouseover=\"alert(1)".into(),
            nodes: vec![Node::new("<img onerror='x'>", Some("<b>bold</b>"))],
            ..Default::default()
        };
        let out = render_violation(&v);
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;: a &amp; b"));
        assert!(out.contains("&quot;quoted&quot;"));
        assert!(out.contains("href=\"https://x/&quot; onmouseover=&quot;alert(1)\""));
        assert!(out.contains("&lt;img onerror=&#039;x&#039;&gt;"));
        assert!(out.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_exactly_one_active_tab_and_panel() {
        let html = render_report(&two_section_report(contrast_results(), ResultSet::degraded()));
        assert_eq!(html.matches("class=\"tab active\"").count(), 1);
        assert_eq!(html.matches("class=\"tab-content active\"").count(), 1);
        assert!(html.contains("<button class=\"tab active\" data-tab=\"issues\">Issues Demo</button>"));
        assert!(html.contains("<button class=\"tab\" data-tab=\"fixed\">Fixed Demo</button>"));
        assert!(html.contains("<div id=\"issues\" class=\"tab-content active\">"));
        assert!(html.contains("<div id=\"fixed\" class=\"tab-content\">"));
    }

    #[test]
    fn test_sections_sharing_a_name_get_one_active_tab() {
        let report = Report::new(vec![
            Section::new("home", "Home", "Home", contrast_results()),
            Section::new("home", "Home again", "Home again", ResultSet::degraded()),
        ]);
        let html = render_report(&report);
        assert_eq!(html.matches("class=\"tab active\"").count(), 1);
        assert_eq!(html.matches("class=\"tab-content active\"").count(), 1);
        assert!(html.contains("<button class=\"tab active\" data-tab=\"home\">Home</button>"));
        assert!(html.contains("<button class=\"tab\" data-tab=\"home\">Home again</button>"));
    }

    #[test]
    fn test_document_is_self_contained() {
        let html = render_report(&two_section_report(ResultSet::degraded(), ResultSet::degraded()));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("function selectTab"));
        assert!(!html.contains("<script src"));
        assert!(!html.contains("<link"));
        assert_eq!(html.matches(NO_VIOLATIONS_MESSAGE).count(), 2);
    }

    #[test]
    fn test_header_title_and_date() {
        let report = two_section_report(ResultSet::degraded(), ResultSet::degraded())
            .with_title("A11y <Nightly>");
        let html = render_report(&report);
        assert!(html.contains("<h1>A11y &lt;Nightly&gt;</h1>"));
        assert!(html.contains(&format!("<strong>Date:</strong> {}", report.date_label())));
    }
}
