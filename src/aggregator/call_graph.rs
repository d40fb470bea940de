//! Call graph with normalized fractions.
//!
//! Turns raw per-function totals into nodes whose metrics are normalized
//! against the profile-wide maximum, and merges call records into one edge
//! per (caller, callee) pair. All iteration follows first-insertion order
//! so the generated document is byte-for-byte reproducible.

use crate::parser::schema::RawProfile;
use crate::utils::error::GraphError;
use indexmap::IndexMap;
use log::debug;

/// A metric value and its share of the profile-wide maximum
///
/// `value` is `None` when only the fraction is known.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stat {
    pub value: Option<f64>,
    pub fraction: f64,
}

impl Stat {
    /// Normalize `value` against `max`; a zero maximum yields a zero fraction
    pub fn new(value: f64, max: f64) -> Self {
        let fraction = if max > 0.0 { value / max } else { 0.0 };
        Self {
            value: Some(value),
            fraction,
        }
    }

    /// A stat that only carries a fraction
    pub fn from_fraction(fraction: f64) -> Self {
        Self {
            value: None,
            fraction,
        }
    }
}

/// The two fractions the color mapper consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fractions {
    pub time: f64,
    pub calls: f64,
}

/// One traced function
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileNode {
    /// Fully-qualified function name, unique within the graph
    pub name: String,
    pub calls: Stat,
    pub time: Stat,
    pub memory_in: Stat,
    pub memory_out: Stat,
    /// Explicit group label
    pub group: Option<String>,
}

impl ProfileNode {
    /// Build a node from pre-computed fractions
    pub fn with_fractions(name: impl Into<String>, time: f64, calls: f64) -> Self {
        Self {
            name: name.into(),
            calls: Stat::from_fraction(calls),
            time: Stat::from_fraction(time),
            memory_in: Stat::default(),
            memory_out: Stat::default(),
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn fractions(&self) -> Fractions {
        Fractions {
            time: self.time.fraction,
            calls: self.calls.fraction,
        }
    }

    /// Explicit group, or the name up to the first `.`
    pub fn group_label(&self) -> &str {
        match &self.group {
            Some(group) => group.as_str(),
            None => self.name.split('.').next().unwrap_or(&self.name),
        }
    }
}

/// Calling side of an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Caller {
    /// Root call with no calling function
    Root,
    Function(String),
}

impl Caller {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => Caller::Function(name.to_string()),
            None => Caller::Root,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Caller::Root => None,
            Caller::Function(name) => Some(name.as_str()),
        }
    }
}

/// One (caller, callee) pair with its accumulated call count
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEdge {
    pub caller: Caller,
    pub callee: String,
    pub count: u64,
    /// Count normalized against the busiest edge
    pub calls: Stat,
    /// Time of the callee
    pub time: Stat,
}

impl ProfileEdge {
    pub fn fractions(&self) -> Fractions {
        Fractions {
            time: self.time.fraction,
            calls: self.calls.fraction,
        }
    }
}

/// Nodes, edges and groups of one profile
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    nodes: IndexMap<String, ProfileNode>,
    edge_counts: IndexMap<(Caller, String), u64>,
    grouping: bool,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw totals
    ///
    /// **Public** - main entry point for aggregation
    pub fn from_profile(profile: &RawProfile, grouping: bool) -> Self {
        let funcs = &profile.functions;
        let max_calls = max_of(funcs.iter().map(|f| f.calls as f64));
        let max_time = max_of(funcs.iter().map(|f| f.total_time));
        let max_memory_in = max_of(funcs.iter().map(|f| f.memory_in));
        let max_memory_out = max_of(funcs.iter().map(|f| f.memory_out));

        let mut graph = Self::new().with_grouping(grouping);

        for func in funcs {
            graph.add_node(ProfileNode {
                name: func.name.clone(),
                calls: Stat::new(func.calls as f64, max_calls),
                time: Stat::new(func.total_time, max_time),
                memory_in: Stat::new(func.memory_in, max_memory_in),
                memory_out: Stat::new(func.memory_out, max_memory_out),
                group: func.group.clone(),
            });
        }

        for call in &profile.calls {
            graph.add_call(call.caller.as_deref(), &call.callee, call.count);
        }

        debug!(
            "Aggregated {} nodes and {} edges",
            graph.node_count(),
            graph.edge_counts.len()
        );

        graph
    }

    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }

    /// Insert a node; a node with the same name is replaced in place
    pub fn add_node(&mut self, node: ProfileNode) {
        self.nodes.insert(node.name.clone(), node);
    }

    /// Record `count` calls from `caller` to `callee`
    ///
    /// Repeated pairs accumulate into the existing edge.
    pub fn add_call(&mut self, caller: Option<&str>, callee: &str, count: u64) {
        *self
            .edge_counts
            .entry((Caller::from_name(caller), callee.to_string()))
            .or_insert(0) += count;
    }

    pub fn node(&self, name: &str) -> Option<&ProfileNode> {
        self.nodes.get(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ProfileNode> {
        self.nodes.values()
    }

    /// All edges in insertion order, root calls included
    pub fn edges(&self) -> Vec<ProfileEdge> {
        let max_count = max_of(self.edge_counts.values().map(|c| *c as f64));

        self.edge_counts
            .iter()
            .map(|((caller, callee), count)| ProfileEdge {
                caller: caller.clone(),
                callee: callee.clone(),
                count: *count,
                calls: Stat::new(*count as f64, max_count),
                time: self.nodes.get(callee).map(|n| n.time).unwrap_or_default(),
            })
            .collect()
    }

    /// Group label to member names, in order of first appearance
    ///
    /// Empty when grouping is disabled.
    pub fn groups(&self) -> IndexMap<&str, Vec<&str>> {
        let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
        if !self.grouping {
            return groups;
        }

        for node in self.nodes.values() {
            groups
                .entry(node.group_label())
                .or_default()
                .push(node.name.as_str());
        }
        groups
    }

    /// Reject fractions outside [0, 1] and edges with unknown endpoints
    pub fn validate(&self) -> Result<(), GraphError> {
        for node in self.nodes.values() {
            for (metric, stat) in [
                ("calls", node.calls),
                ("time", node.time),
                ("memory_in", node.memory_in),
                ("memory_out", node.memory_out),
            ] {
                check_fraction(&node.name, metric, stat.fraction)?;
            }
        }

        for (caller, callee) in self.edge_counts.keys() {
            if let Some(name) = caller.name() {
                if !self.nodes.contains_key(name) {
                    return Err(GraphError::MalformedInput(format!(
                        "caller {} of {} is not a known function",
                        name, callee
                    )));
                }
            }
            if !self.nodes.contains_key(callee) {
                return Err(GraphError::MalformedInput(format!(
                    "callee {} is not a known function",
                    callee
                )));
            }
        }

        Ok(())
    }
}

fn check_fraction(name: &str, metric: &str, fraction: f64) -> Result<(), GraphError> {
    if (0.0..=1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(GraphError::MalformedInput(format!(
            "{} fraction of {} is {}, expected a value in [0, 1]",
            metric, name, fraction
        )))
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}
