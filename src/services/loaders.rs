use crate::domain::models::FieldMapping;
use crate::services::catalog::RuleCatalog;
use crate::services::index::MetricKeyIndex;
use crate::store::{FlattenedMetricStore, DEFAULT_IGNORED_ROOTS};
use anyhow::Context;
use std::path::Path;

/// Reads the ordered sample list from a sample sheet: first column only,
/// rows below the `Sample_ID` header marker, blanks skipped.
pub fn load_sample_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading sample sheet {}", path.display()))?;

    let mut samples = Vec::new();
    let mut in_data = false;
    for line in raw.lines() {
        let first = line.split(',').next().unwrap_or("").trim();
        if in_data {
            if !first.is_empty() {
                samples.push(first.to_string());
            }
        } else if first == "Sample_ID" {
            in_data = true;
        }
    }
    if !in_data {
        anyhow::bail!("no Sample_ID column header in {}", path.display());
    }
    Ok(samples)
}

/// Reads the raw metric export and flattens it into dotted paths, dropping
/// the provenance/plot roots that carry no per-sample metrics.
pub fn load_store(path: &Path) -> anyhow::Result<FlattenedMetricStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading metric export {}", path.display()))?;
    let root: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing metric export {}", path.display()))?;
    Ok(FlattenedMetricStore::from_json(&root, DEFAULT_IGNORED_ROOTS))
}

pub fn load_catalog(path: &Path) -> anyhow::Result<RuleCatalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading rule config {}", path.display()))?;
    let config: serde_yaml::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing rule config {}", path.display()))?;
    RuleCatalog::from_config(&config)
        .with_context(|| format!("validating rule config {}", path.display()))
}

pub fn load_index(path: &Path) -> anyhow::Result<MetricKeyIndex> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading mapping table {}", path.display()))?;
    let rows: Vec<FieldMapping> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing mapping table {}", path.display()))?;
    Ok(MetricKeyIndex::from_mappings(rows))
}
