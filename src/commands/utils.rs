/// Display version information
pub fn display_version() {
    println!("Callgraph Viz v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Renders call-graph profiles into Graphviz documents and images.");
}
