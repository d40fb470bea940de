//! Node label templates.
//!
//! Supported placeholders: `{func}`, `{hits}`, `{total_time}`,
//! `{total_memory_in}` and `{total_memory_out}`. Substituted values are
//! escaped; template text is kept as-is so Graphviz `\n` breaks survive.

use super::attributes::escape;
use crate::aggregator::ProfileNode;

/// Shown in place of a metric whose raw value is unknown
pub const MISSING_VALUE: &str = "n/a";

/// Expand a label template for one node
pub fn render_node_label(template: &str, node: &ProfileNode) -> String {
    let mut out = String::with_capacity(template.len() + node.name.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match placeholder(key, node) {
                    Some(value) => out.push_str(&value),
                    None => {
                        // Unknown placeholder, keep it literally
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn placeholder(key: &str, node: &ProfileNode) -> Option<String> {
    let value = match key {
        "func" => escape(&node.name).into_owned(),
        "hits" => format_value(node.calls.value, format_hits),
        "total_time" => format_value(node.time.value, format_time),
        "total_memory_in" => format_value(node.memory_in.value, human_readable_size),
        "total_memory_out" => format_value(node.memory_out.value, human_readable_size),
        _ => return None,
    };
    Some(value)
}

/// Format a raw metric, or `n/a` for nodes that only carry fractions
pub fn format_value(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), format)
}

pub fn format_hits(calls: f64) -> String {
    format!("{}", calls.round() as u64)
}

pub fn format_time(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

/// Format a byte count with a binary unit, e.g. `1.5KB`
pub fn human_readable_size(bytes: f64) -> String {
    let mut num = bytes;
    for unit in ["B", "KB", "MB", "GB"] {
        if num.abs() < 1024.0 {
            return format!("{:.1}{}", num, unit);
        }
        num /= 1024.0;
    }
    format!("{:.1}TB", num)
}
