use crate::store::{FlattenedMetricStore, MetricValue};
use indexmap::IndexMap;

/// Metrics whose stored values use a different unit than their rules were
/// authored in, with the factor that converts them. The stock entry covers
/// the percent-of-target-bases coverage metric, exported as a fraction while
/// its thresholds are written in percent.
#[derive(Debug, Clone)]
pub struct RescaleTable {
    factors: IndexMap<String, f64>,
}

impl Default for RescaleTable {
    fn default() -> Self {
        let mut factors = IndexMap::new();
        factors.insert("PCT_TARGET_BASES_20X".to_string(), 100.0);
        Self { factors }
    }
}

impl RescaleTable {
    pub fn insert(&mut self, metric_key: impl Into<String>, factor: f64) {
        self.factors.insert(metric_key.into(), factor);
    }

    pub fn factor(&self, metric_key: &str) -> Option<f64> {
        self.factors.get(metric_key).copied()
    }
}

/// Finds every value stored for a sample/metric pair.
///
/// Two shapes of path match. An exact match has the metric directly under the
/// sample (`sample_1.FOLD_ENRICHMENT`) and yields a single entry keyed by the
/// sample itself. A fan-out match has an underscore-led uppercase suffix
/// between the two (`sample_1_L001_R1.percent_duplicates`,
/// `sample_1_SNP_ALL.…`) and yields one entry per distinct sub-key. When an
/// exact match exists, fan-out matches are discarded.
///
/// Sample occurrences are only accepted on identifier boundaries, so
/// `sample_1` never claims paths belonging to `sample_10`.
///
/// An empty result means the metric is absent for this sample; that is not
/// an error.
pub fn resolve(
    store: &FlattenedMetricStore,
    sample_id: &str,
    metric_key: &str,
    rescale: &RescaleTable,
) -> IndexMap<String, MetricValue> {
    let mut exact: IndexMap<String, MetricValue> = IndexMap::new();
    let mut fanned: IndexMap<String, MetricValue> = IndexMap::new();
    let exact_suffix = format!(".{metric_key}");

    for (path, value) in store.iter() {
        if !path.contains(metric_key) {
            continue;
        }
        for (pos, _) in path.match_indices(sample_id) {
            if !boundary_before(path, pos) {
                continue;
            }
            let rest = &path[pos + sample_id.len()..];
            if rest.starts_with(&exact_suffix) {
                exact.insert(sample_id.to_string(), rescaled(value, metric_key, rescale));
                break;
            }
            let span = fan_out_span(rest);
            if !span.is_empty() {
                fanned.insert(
                    format!("{sample_id}{span}"),
                    rescaled(value, metric_key, rescale),
                );
                break;
            }
        }
    }

    if exact.is_empty() {
        fanned
    } else {
        exact
    }
}

/// An occurrence only counts when it starts the path or follows a
/// non-identifier character, so one sample id cannot match inside another.
fn boundary_before(path: &str, pos: usize) -> bool {
    match path[..pos].chars().next_back() {
        None => true,
        Some(c) => !c.is_ascii_alphanumeric() && c != '_',
    }
}

/// Lane/read and control variant-type suffixes: an underscore-led run of
/// uppercase letters, digits, and underscores.
fn fan_out_span(rest: &str) -> &str {
    if !rest.starts_with('_') {
        return "";
    }
    let end = rest
        .find(|c: char| !c.is_ascii_uppercase() && !c.is_ascii_digit() && c != '_')
        .unwrap_or(rest.len());
    &rest[..end]
}

fn rescaled(value: &MetricValue, metric_key: &str, rescale: &RescaleTable) -> MetricValue {
    match (value, rescale.factor(metric_key)) {
        (MetricValue::Number(n), Some(factor)) => MetricValue::Number(n * factor),
        _ => value.clone(),
    }
}
