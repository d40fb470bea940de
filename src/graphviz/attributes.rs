//! Graphviz attribute lists and quoted identifiers.

use std::borrow::Cow;

/// Ordered attribute name/value pairs
pub type Attributes = Vec<(&'static str, String)>;

/// Render `name = "value"` pairs joined by `, `
///
/// Values are inserted verbatim; escape them first with [`escape`] when they
/// come from profile data.
pub fn render_attributes(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!("{} = \"{}\"", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape backslashes and double quotes for a DOT quoted string
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['"', '\\']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Wrap an identifier in double quotes, escaping its content
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape(text))
}
