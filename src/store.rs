use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root keys of the raw export that carry provenance or plot payloads
/// rather than per-sample metrics.
pub const DEFAULT_IGNORED_ROOTS: &[&str] = &[
    "report_data_sources",
    "report_general_stats_headers",
    "reports_plot_data",
];

#[derive(thiserror::Error, Debug)]
pub enum ClassifyError {
    #[error("config field has no metric key mapping: {0}")]
    UnmappedField(String),
    #[error("no rules configured for: {0}")]
    UnknownMetric(String),
    #[error("value {0:?} cannot be compared against a numeric threshold")]
    TypeConversion(String),
    #[error("rule table missing from config (table_cond_formatting_rules)")]
    MissingRuleTable,
}

/// A single metric value. Booleans in the raw export are normalized to the
/// strings `"true"`/`"false"` so downstream string comparisons see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Result<f64, ClassifyError> {
        match self {
            MetricValue::Number(n) => Ok(*n),
            MetricValue::Text(t) => t
                .trim()
                .parse::<f64>()
                .map_err(|_| ClassifyError::TypeConversion(t.clone())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Text(t) => Some(t),
            MetricValue::Number(_) => None,
        }
    }

    pub fn text_eq(&self, other: &str) -> bool {
        match self {
            MetricValue::Text(t) => t == other,
            MetricValue::Number(n) => n.to_string() == other,
        }
    }
}

/// The run's metric export collapsed into single-level dotted paths, e.g.
/// `report_saved_raw_data.multiqc_general_stats.sample_1_L001_R1.percent_duplicates`.
/// Built once per run and read-only afterwards.
#[derive(Debug, Default)]
pub struct FlattenedMetricStore {
    entries: IndexMap<String, MetricValue>,
}

impl FlattenedMetricStore {
    pub fn from_json(root: &Value, ignore_roots: &[&str]) -> Self {
        let mut entries = IndexMap::new();
        if let Value::Object(map) = root {
            for (key, val) in map {
                if ignore_roots.contains(&key.as_str()) {
                    continue;
                }
                flatten_into(&mut entries, key.clone(), val);
            }
        }
        Self { entries }
    }

    pub fn from_entries(pairs: impl IntoIterator<Item = (String, MetricValue)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&MetricValue> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(out: &mut IndexMap<String, MetricValue>, path: String, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                flatten_into(out, format!("{path}.{key}"), val);
            }
        }
        Value::Array(items) => {
            for (idx, val) in items.iter().enumerate() {
                flatten_into(out, format!("{path}.{idx}"), val);
            }
        }
        Value::String(s) => {
            out.insert(path, MetricValue::Text(s.clone()));
        }
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                out.insert(path, MetricValue::Number(f));
            }
        }
        Value::Bool(b) => {
            let text = if *b { "true" } else { "false" };
            out.insert(path, MetricValue::Text(text.to_string()));
        }
        Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{FlattenedMetricStore, MetricValue, DEFAULT_IGNORED_ROOTS};
    use serde_json::json;

    #[test]
    fn flattens_nested_objects_and_arrays() {
        let raw = json!({
            "report_general_stats_data": [
                {"sample_1": {"FOLD_ENRICHMENT": 1500}},
                {"sample_1": {"Match_Sexes": true}}
            ]
        });
        let store = FlattenedMetricStore::from_json(&raw, DEFAULT_IGNORED_ROOTS);

        assert_eq!(
            store.get("report_general_stats_data.0.sample_1.FOLD_ENRICHMENT"),
            Some(&MetricValue::Number(1500.0))
        );
        assert_eq!(
            store.get("report_general_stats_data.1.sample_1.Match_Sexes"),
            Some(&MetricValue::Text("true".to_string()))
        );
    }

    #[test]
    fn skips_designated_roots() {
        let raw = json!({
            "report_data_sources": {"FastQC": {"all_sections": {"x": 1}}},
            "reports_plot_data": {"y": 2},
            "report_saved_raw_data": {"kept": 3}
        });
        let store = FlattenedMetricStore::from_json(&raw, DEFAULT_IGNORED_ROOTS);

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("report_saved_raw_data.kept"),
            Some(&MetricValue::Number(3.0))
        );
    }

    #[test]
    fn booleans_become_boolean_like_strings() {
        let raw = json!({"a": {"ok": false}});
        let store = FlattenedMetricStore::from_json(&raw, &[]);
        assert_eq!(store.get("a.ok"), Some(&MetricValue::Text("false".to_string())));
    }

    #[test]
    fn text_values_convert_to_numbers_when_numeric() {
        assert_eq!(MetricValue::Text("1.0".to_string()).as_f64().unwrap(), 1.0);
        assert!(MetricValue::Text("NA".to_string()).as_f64().is_err());
    }
}
