use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use super::model::GraphSnapshot;

pub fn parse_snapshot(raw: &str) -> Result<GraphSnapshot> {
    let parsed: Value = serde_json::from_str(raw).context("invalid snapshot JSON")?;
    if !parsed.is_object() {
        return Err(anyhow!("unexpected JSON type for graph snapshot"));
    }

    serde_json::from_value(parsed).context("snapshot JSON does not match vertices/links layout")
}

pub fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    parse_snapshot(&raw).with_context(|| format!("failed to parse snapshot {}", path.display()))
}
