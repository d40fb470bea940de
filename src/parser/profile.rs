//! Profile loader.
//!
//! Reads profile JSON from disk or memory and rejects data the rest of the
//! pipeline cannot turn into a valid graph.

use super::schema::RawProfile;
use crate::utils::error::ProfileError;
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a profile from a JSON string
///
/// **Public** - main entry point for in-memory input
///
/// # Errors
/// * `ProfileError::JsonError` - Invalid JSON structure
/// * `ProfileError::InvalidProfile` - Duplicate or empty names, bad totals
pub fn parse_profile(json: &str) -> Result<RawProfile, ProfileError> {
    let profile: RawProfile = serde_json::from_str(json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Read a profile from a JSON file
///
/// **Public** - used by the CLI commands
///
/// # Errors
/// * `ProfileError::ReadFailed` - File cannot be opened
/// * `ProfileError::JsonError` - Invalid JSON structure
/// * `ProfileError::InvalidProfile` - Content fails validation
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<RawProfile, ProfileError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path)?;
    let profile: RawProfile = serde_json::from_reader(BufReader::new(file))?;
    validate_profile(&profile)?;

    debug!(
        "Profile loaded: {} functions, {} call records",
        profile.functions.len(),
        profile.calls.len()
    );

    Ok(profile)
}

/// Check names and totals
///
/// **Public** - callers building a `RawProfile` by hand can reuse it
pub fn validate_profile(profile: &RawProfile) -> Result<(), ProfileError> {
    let mut seen = HashSet::with_capacity(profile.functions.len());

    for func in &profile.functions {
        if func.name.is_empty() {
            return Err(ProfileError::InvalidProfile(
                "function name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(func.name.as_str()) {
            return Err(ProfileError::InvalidProfile(format!(
                "duplicate function: {}",
                func.name
            )));
        }

        for (metric, value) in [
            ("total_time", func.total_time),
            ("memory_in", func.memory_in),
            ("memory_out", func.memory_out),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidProfile(format!(
                    "{} of {} must be a finite non-negative number, got {}",
                    metric, func.name, value
                )));
            }
        }
    }

    for call in &profile.calls {
        if call.callee.is_empty() || call.caller.as_deref() == Some("") {
            return Err(ProfileError::InvalidProfile(
                "call records need non-empty function names".to_string(),
            ));
        }
    }

    Ok(())
}
