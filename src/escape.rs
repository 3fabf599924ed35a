//! HTML escaping for untrusted text embedded in the report.

/// Escape `&`, `<`, `>`, `"` and `'` into their entities.
///
/// Each input character is visited once, so an `&` produced by another
/// entity is never re-escaped. This is equivalent to replacing `&` first.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
