//! Tab state for the report: one state per section, exactly one active.
//!
//! Tabs are addressed by position, so sections sharing a name still get a
//! single active tab. The renderer uses this to mark the initial tab. Tab
//! switching after load is done by `inline_script` in the browser; there
//! is no server-side transition.

#[derive(Debug, Clone, Copy)]
pub struct TabController {
    count: usize,
    current: usize,
}

impl TabController {
    /// Build for `count` tabs with the first one active. Returns `None`
    /// when there are no tabs.
    pub fn new(count: usize) -> Option<Self> {
        (count > 0).then_some(Self { count, current: 0 })
    }

    pub fn is_active(&self, idx: usize) -> bool {
        idx < self.count && idx == self.current
    }
}

/// Runtime tab switcher. Clicking a `.tab` button deactivates every tab and
/// panel, then activates that button and the panel whose id equals its
/// `data-tab`. Ids are compared as plain strings, never spliced into a
/// selector.
pub fn inline_script() -> &'static str {
    r#"
function selectTab(tabId) {
  var button = null;
  document.querySelectorAll(".tab").forEach(function (b) {
    b.classList.remove("active");
    if (button === null && b.getAttribute("data-tab") === tabId) { button = b; }
  });
  document.querySelectorAll(".tab-content").forEach(function (p) { p.classList.remove("active"); });
  var panel = document.getElementById(tabId);
  if (button && panel) {
    button.classList.add("active");
    panel.classList.add("active");
  }
}
document.querySelectorAll(".tab").forEach(function (b) {
  b.addEventListener("click", function () { selectTab(b.getAttribute("data-tab")); });
});
"#
}
