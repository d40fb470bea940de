#![cfg(unix)]

use callgraph_viz::aggregator::{CallGraph, ProfileNode};
use callgraph_viz::graphviz::{ColorScheme, GraphvizConfig};
use callgraph_viz::render::{render_document, render_graph, render_graph_with_tool};
use callgraph_viz::utils::RenderError;
use std::collections::HashSet;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

// Scripts are written and executed under this lock so no concurrent fork
// inherits a write handle to them ("text file busy").
static PROCESS_LOCK: Mutex<()> = Mutex::new(());

/// Copies the input DOT file to the `-o` path
const COPY_SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    -o*) out="${arg#-o}" ;;
  esac
  last="$arg"
done
cp "$last" "$out"
"#;

fn two_node_graph() -> CallGraph {
    let mut graph = CallGraph::new();
    graph.add_node(ProfileNode::with_fractions("main", 1.0, 1.0));
    graph.add_node(ProfileNode::with_fractions("helper", 0.2, 0.5));
    graph.add_call(None, "main", 1);
    graph.add_call(Some("main"), "helper", 5);
    graph
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).unwrap().next().is_none()
}

struct Workspace {
    temp: TempDir,
    scripts: TempDir,
    output: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            temp: tempfile::tempdir().unwrap(),
            scripts: tempfile::tempdir().unwrap(),
            output: tempfile::tempdir().unwrap(),
        }
    }

    fn config(&self, tool: impl Into<String>) -> GraphvizConfig {
        GraphvizConfig::default()
            .with_tool(tool)
            .with_temp_dir(self.temp.path())
            .with_output_file(self.output.path().join("callgraph.png"))
    }
}

#[test]
fn test_tool_failure_removes_transient_file() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();

    let result = render_graph(&two_node_graph(), &ws.config("false"), &ColorScheme::default());

    match result {
        Err(RenderError::RenderToolFailure { command, code }) => {
            assert_eq!(code, Some(1));
            assert!(command.starts_with("false -Tpng -o"));
            assert!(command.ends_with(".dot"));
        }
        other => panic!("expected RenderToolFailure, got {:?}", other),
    }
    assert!(is_empty_dir(ws.temp.path()));
}

#[test]
fn test_missing_tool_writes_nothing() {
    let ws = Workspace::new();
    let config = ws
        .config("callgraph-viz-missing-tool")
        .with_output_file(ws.output.path().join("nested/callgraph.png"));

    let result = render_graph(&two_node_graph(), &config, &ColorScheme::default());

    assert!(matches!(result, Err(RenderError::ToolNotFound(_))));
    assert!(is_empty_dir(ws.temp.path()));
    assert!(!ws.output.path().join("nested").exists());
}

#[test]
fn test_successful_render_passes_document_to_tool() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    let script = write_script(ws.scripts.path(), "fake-dot", COPY_SCRIPT);

    let outcome = render_graph(
        &two_node_graph(),
        &ws.config(script.to_str().unwrap()),
        &ColorScheme::default(),
    )
    .unwrap();

    assert_eq!(outcome.node_count, 2);
    let rendered = fs::read_to_string(&outcome.output_file).unwrap();
    assert!(rendered.starts_with("digraph G {"));
    assert!(rendered.contains(r#""main" -> "helper" ["#));
    assert!(is_empty_dir(ws.temp.path()));
}

#[test]
fn test_special_characters_in_output_path() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    let script = write_script(ws.scripts.path(), "fake-dot", COPY_SCRIPT);
    let output = ws.output.path().join("out dir/call graph; $(touch x).png");
    let config = ws.config(script.to_str().unwrap()).with_output_file(&output);

    let outcome = render_document("digraph G {\n}\n", 0, &config).unwrap();

    assert_eq!(outcome.output_file, output);
    assert_eq!(fs::read_to_string(&output).unwrap(), "digraph G {\n}\n");
}

#[test]
fn test_timeout_kills_tool() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    let script = write_script(ws.scripts.path(), "slow-dot", "#!/bin/sh\nexec sleep 30\n");
    let config = ws
        .config(script.to_str().unwrap())
        .with_timeout_secs(Some(1));

    let result = render_graph(&two_node_graph(), &config, &ColorScheme::default());

    assert!(matches!(result, Err(RenderError::Timeout { .. })));
    assert!(is_empty_dir(ws.temp.path()));
}

#[test]
fn test_malformed_graph_never_reaches_tool() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    let mut graph = two_node_graph();
    graph.add_call(Some("main"), "ghost", 1);

    let result = render_graph(&graph, &ws.config("true"), &ColorScheme::default());

    assert!(matches!(result, Err(RenderError::MalformedInput(_))));
    assert!(is_empty_dir(ws.temp.path()));
}

#[test]
fn test_concurrent_renders_use_distinct_files() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    let log = ws.scripts.path().join("inputs.log");
    let body = COPY_SCRIPT.replace(
        "cp \"$last\" \"$out\"",
        &format!("echo \"$last\" >> \"{}\"\ncp \"$last\" \"$out\"", log.display()),
    );
    let script = write_script(ws.scripts.path(), "logging-dot", &body);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let output = ws.output.path().join(format!("callgraph-{}.png", i));
            let config = ws
                .config(script.to_str().unwrap())
                .with_output_file(&output);
            std::thread::spawn(move || {
                let mut graph = CallGraph::new();
                graph.add_node(ProfileNode::with_fractions(format!("worker_{}", i), 1.0, 1.0));
                render_graph(&graph, &config, &ColorScheme::default()).map(|_| (i, output))
            })
        })
        .collect();

    for handle in handles {
        let (i, output) = handle.join().unwrap().unwrap();
        let rendered = fs::read_to_string(&output).unwrap();
        assert!(rendered.contains(&format!("\"worker_{}\" [", i)));
        for other in (0..4).filter(|other| *other != i) {
            assert!(!rendered.contains(&format!("\"worker_{}\"", other)));
        }
    }

    let inputs: Vec<String> = fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    let unique: HashSet<&String> = inputs.iter().collect();
    assert_eq!(inputs.len(), 4);
    assert_eq!(unique.len(), 4);
    assert!(inputs.iter().all(|path| path.ends_with(".dot")));
    assert!(is_empty_dir(ws.temp.path()));
}

#[test]
fn test_prepared_tool_path_skips_lookup() {
    let _guard = PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let ws = Workspace::new();
    let script = write_script(ws.scripts.path(), "fake-dot", COPY_SCRIPT);
    let config = ws.config("callgraph-viz-missing-tool");

    let outcome = render_graph_with_tool(
        &script,
        &two_node_graph(),
        &config,
        &ColorScheme::default(),
    )
    .unwrap();

    assert_eq!(outcome.node_count, 2);
    assert!(fs::read_to_string(&outcome.output_file)
        .unwrap()
        .starts_with("digraph G {"));
}
