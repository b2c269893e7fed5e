use crate::domain::models::{Condition, RuleBand, RuleSet, Status};
use crate::store::ClassifyError;
use anyhow::Context;
use indexmap::IndexMap;

/// Key under which the rule config declares its per-metric condition table.
pub const RULE_TABLE_KEY: &str = "table_cond_formatting_rules";

/// Declaration-ordered rule sets keyed by config field. Loaded once per run
/// from the YAML config, read-only afterwards.
#[derive(Debug, Default)]
pub struct RuleCatalog {
    rules: IndexMap<String, RuleSet>,
}

impl RuleCatalog {
    /// A config without the rule table is unusable; that is a fatal
    /// configuration error, not a per-metric one.
    pub fn from_config(config: &serde_yaml::Value) -> anyhow::Result<Self> {
        let table = config
            .get(RULE_TABLE_KEY)
            .and_then(|v| v.as_mapping())
            .ok_or(ClassifyError::MissingRuleTable)?;

        let mut rules = IndexMap::new();
        for (field, bands) in table {
            let field = field
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("non-string config field name: {field:?}"))?;
            rules.insert(field.to_string(), parse_rule_set(field, bands)?);
        }
        Ok(Self { rules })
    }

    /// A miss is surfaced to the caller; the run-level policy is to log it
    /// and skip the metric, never to abort the sample.
    pub fn rules_for(&self, config_field: &str) -> Result<&RuleSet, ClassifyError> {
        self.rules
            .get(config_field)
            .ok_or_else(|| ClassifyError::UnknownMetric(config_field.to_string()))
    }

    /// Config fields in declared order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_rule_set(field: &str, value: &serde_yaml::Value) -> anyhow::Result<RuleSet> {
    let mapping = value
        .as_mapping()
        .ok_or_else(|| anyhow::anyhow!("conditions for {field} are not a mapping"))?;

    let mut bands = Vec::with_capacity(mapping.len());
    for (label, conditions) in mapping {
        let (label, status) = parse_category(field, label)?;
        let conditions: Vec<Condition> = serde_json::to_value(conditions)
            .with_context(|| format!("invalid condition list for {field}/{label}"))
            .and_then(|json| {
                serde_json::from_value(json)
                    .with_context(|| format!("invalid condition list for {field}/{label}"))
            })?;
        bands.push(RuleBand {
            label,
            status,
            conditions,
        });
    }
    Ok(RuleSet { bands })
}

/// Outcome categories are `pass`/`warn`/`fail`, plus the boolean literal
/// `true` left over from an older authoring convention (meaning pass).
fn parse_category(field: &str, label: &serde_yaml::Value) -> anyhow::Result<(String, Status)> {
    match label {
        serde_yaml::Value::Bool(true) => Ok(("true".to_string(), Status::Pass)),
        serde_yaml::Value::String(s) => match s.as_str() {
            "pass" => Ok((s.clone(), Status::Pass)),
            "warn" => Ok((s.clone(), Status::Warn)),
            "fail" => Ok((s.clone(), Status::Fail)),
            other => anyhow::bail!("unrecognized outcome category {other:?} for {field}"),
        },
        other => anyhow::bail!("unsupported outcome category key {other:?} for {field}"),
    }
}
