use crate::domain::models::{ClassificationRecord, MetricRecords, SampleReport, Status};
use crate::services::catalog::RuleCatalog;
use crate::services::index::MetricKeyIndex;
use crate::services::resolver::{self, RescaleTable};
use crate::services::evaluate;
use crate::store::FlattenedMetricStore;
use indexmap::IndexMap;

/// Classifies every configured metric for one sample.
///
/// Metrics are walked in the catalog's declared order. A config field with no
/// metric-key mapping aborts the run (the rule/index pairing is broken); a
/// metric with no resolved values is omitted from the sample's details; a
/// value that cannot be compared is recorded as `unknown` and the sample
/// continues.
pub fn classify(
    sample_id: &str,
    store: &FlattenedMetricStore,
    index: &MetricKeyIndex,
    catalog: &RuleCatalog,
    rescale: &RescaleTable,
) -> anyhow::Result<SampleReport> {
    let mut metrics: IndexMap<String, MetricRecords> = IndexMap::new();
    let mut statuses: Vec<Status> = Vec::new();

    for config_field in catalog.fields() {
        let rules = match catalog.rules_for(config_field) {
            Ok(rules) => rules,
            Err(err) => {
                tracing::warn!(sample = sample_id, %err, "skipping metric");
                continue;
            }
        };
        let metric_key = index.resolve(config_field)?;
        let values = resolver::resolve(store, sample_id, metric_key, rescale);
        if values.is_empty() {
            continue;
        }

        let mut records = Vec::with_capacity(values.len());
        for (sub_key, value) in values {
            let status = match evaluate::evaluate(&value, rules) {
                Ok(status) => status,
                Err(err) => {
                    tracing::warn!(
                        sample = sample_id,
                        metric = metric_key,
                        %err,
                        "record not comparable, marking unknown"
                    );
                    Status::Unknown
                }
            };
            statuses.push(status);
            records.push(ClassificationRecord {
                sample: sub_key,
                value,
                status,
            });
        }
        metrics.insert(metric_key.to_string(), MetricRecords { record: records });
    }

    Ok(SampleReport {
        sample_id: sample_id.to_string(),
        metrics,
        status: Status::aggregate(statuses),
    })
}
