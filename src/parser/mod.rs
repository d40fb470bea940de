//! Profile input parsing and schema definitions.
//!
//! This module handles:
//! - Defining the profile JSON schema
//! - Reading profiles from disk
//! - Validating names and totals

pub mod profile;
pub mod schema;

// Re-export main types
pub use profile::{parse_profile, read_profile, validate_profile};
pub use schema::{CallRecord, FunctionRecord, RawProfile};
