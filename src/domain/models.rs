use crate::store::MetricValue;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
    Unknown,
}

impl Status {
    /// Folds record statuses into a sample status: any fail forces fail,
    /// else any warn forces warn, else pass. `Unknown` never worsens the
    /// result, and an empty record set is a pass.
    pub fn aggregate(records: impl IntoIterator<Item = Status>) -> Status {
        let mut folded = Status::Pass;
        for status in records {
            match status {
                Status::Fail => return Status::Fail,
                Status::Warn => folded = Status::Warn,
                Status::Pass | Status::Unknown => {}
            }
        }
        folded
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Status::Pass => "pass",
            Status::Warn => "warn",
            Status::Fail => "fail",
            Status::Unknown => "unknown",
        })
    }
}

/// A single threshold condition as authored in the rule config,
/// e.g. `{gt: 1350}` or `{s_eq: pass}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Gt(f64),
    Lt(f64),
    Eq(f64),
    SEq(String),
}

/// One outcome category of a rule set, in declared order. `label` keeps the
/// authored spelling (the legacy boolean category keeps label `"true"`).
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBand {
    pub label: String,
    pub status: Status,
    pub conditions: Vec<Condition>,
}

/// Declaration-ordered outcome categories for one metric. Evaluation order
/// matters: a later matching condition overwrites an earlier one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    pub bands: Vec<RuleBand>,
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bands.len()))?;
        for band in &self.bands {
            map.serialize_entry(&band.label, &band.conditions)?;
        }
        map.end()
    }
}

/// One classified value, keyed by the sub-sample it was resolved under
/// (the sample itself, or a lane/variant-type fan-out key).
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub sample: String,
    pub value: MetricValue,
    pub status: Status,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricRecords {
    pub record: Vec<ClassificationRecord>,
}

#[derive(Debug, Clone)]
pub struct SampleReport {
    pub sample_id: String,
    pub metrics: IndexMap<String, MetricRecords>,
    pub status: Status,
}

#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(rename = "Summary")]
    pub summary: IndexMap<String, Status>,
    #[serde(rename = "Details")]
    pub details: IndexMap<String, IndexMap<String, MetricRecords>>,
    #[serde(rename = "Thresholds")]
    pub thresholds: IndexMap<String, RuleSet>,
}

/// One row of the config-field to metric-key reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "Config_field")]
    pub config_field: String,
    #[serde(rename = "Header_ID")]
    pub metric_key: String,
}

#[derive(Debug, Serialize)]
pub struct FieldCheck {
    pub config_field: String,
    pub metric_key: String,
}
