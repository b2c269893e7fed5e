use crate::domain::models::FieldMapping;
use crate::store::ClassifyError;
use indexmap::IndexMap;

/// Lookup from author-facing config field names to the metric keys actually
/// present in the flattened store. Loaded once per run, read-only afterwards.
#[derive(Debug, Default)]
pub struct MetricKeyIndex {
    entries: IndexMap<String, String>,
}

impl MetricKeyIndex {
    /// Duplicate rows are last-write-wins; the overwritten entry is
    /// surfaced as a warning.
    pub fn from_mappings(rows: Vec<FieldMapping>) -> Self {
        let mut entries: IndexMap<String, String> = IndexMap::new();
        for row in rows {
            if let Some(previous) = entries.insert(row.config_field.clone(), row.metric_key) {
                tracing::warn!(
                    config_field = %row.config_field,
                    previous = %previous,
                    "duplicate mapping row, keeping the later entry"
                );
            }
        }
        Self { entries }
    }

    pub fn resolve(&self, config_field: &str) -> Result<&str, ClassifyError> {
        self.entries
            .get(config_field)
            .map(String::as_str)
            .ok_or_else(|| ClassifyError::UnmappedField(config_field.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
