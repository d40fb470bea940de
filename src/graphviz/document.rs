//! Document assembly.
//!
//! Pure structural concatenation: a `digraph` header, four commented
//! blocks, and the closing brace. No section content is inspected.

const INDENT: &str = "    ";

/// Lines of each document section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sections {
    pub attributes: Vec<String>,
    pub groups: Vec<String>,
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
}

/// Join the four sections into one DOT document
///
/// An empty section still gets its comment header followed by a blank line,
/// so the braces stay balanced whatever is missing.
pub fn assemble(sections: &Sections) -> String {
    let mut out = String::from("digraph G {\n\n");

    for (title, lines) in [
        ("Attributes", &sections.attributes),
        ("Groups", &sections.groups),
        ("Nodes", &sections.nodes),
        ("Edges", &sections.edges),
    ] {
        push_block(&mut out, title, lines);
    }

    out.push_str("}\n");
    out
}

fn push_block(out: &mut String, title: &str, lines: &[String]) {
    out.push_str(INDENT);
    out.push_str("// ");
    out.push_str(title);
    out.push('\n');

    if lines.is_empty() {
        out.push('\n');
    }
    for line in lines {
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}
