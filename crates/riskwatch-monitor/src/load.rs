//! Reading and writing incident files
//!
//! An incident file is a JSON array of objects. Elements that are not
//! objects are skipped with a warning rather than failing the whole batch.

use riskwatch_core::{Incident, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Decode an incident array
pub fn parse_incidents(json: &str) -> Result<Vec<Incident>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    let mut incidents = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            warn!(index, "Skipping incident entry that is not an object");
            continue;
        }
        match serde_json::from_value::<Incident>(value) {
            Ok(incident) => incidents.push(incident),
            Err(e) => warn!(index, error = %e, "Skipping undecodable incident entry"),
        }
    }

    Ok(incidents)
}

/// Load incidents from a JSON file
pub fn load_incidents(path: impl AsRef<Path>) -> Result<Vec<Incident>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let incidents = parse_incidents(&content)?;
    debug!(path = %path.display(), count = incidents.len(), "Loaded incidents");
    Ok(incidents)
}

/// Write incidents as a pretty-printed JSON array
pub fn save_incidents(path: impl AsRef<Path>, incidents: &[Incident]) -> Result<()> {
    let json = serde_json::to_string_pretty(incidents)?;
    std::fs::write(path, json)?;
    Ok(())
}
