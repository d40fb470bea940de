//! Input JSON schema for call-graph profiles.
//!
//! This is the shape the tracer hands over: raw per-function totals plus
//! one record per observed (caller, callee) pair. Fractions are computed
//! later by the aggregator.

use serde::{Deserialize, Serialize};

/// Top-level profile structure read from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfile {
    /// Every traced function, in the order the tracer first saw it
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,

    /// Call records; the same pair may appear more than once
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

/// Totals for one traced function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Fully-qualified function name (e.g., "package.module.func")
    pub name: String,

    /// Number of times the function was entered
    pub calls: u64,

    /// Cumulative time spent in the function, in seconds
    #[serde(default, alias = "time")]
    pub total_time: f64,

    /// Memory allocated while inside the function, in bytes
    #[serde(default)]
    pub memory_in: f64,

    /// Memory still held when the function returned, in bytes
    #[serde(default)]
    pub memory_out: f64,

    /// Explicit group label; derived from the name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// One observed call between two functions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Calling function, or `null` for a root call
    #[serde(default)]
    pub caller: Option<String>,

    /// Called function
    pub callee: String,

    /// Number of calls from caller to callee
    #[serde(default = "default_count")]
    pub count: u64,
}

fn default_count() -> u64 {
    1
}
