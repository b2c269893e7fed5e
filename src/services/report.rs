use crate::domain::models::{Report, SampleReport};
use crate::services::catalog::RuleCatalog;
use crate::services::index::MetricKeyIndex;
use crate::store::{FlattenedMetricStore, MetricValue};
use indexmap::IndexMap;
use regex::Regex;

/// Flattened path of the export's invocation command line, used to derive
/// the report filename.
pub const PROVENANCE_COMMAND_KEY: &str = "report_multiqc_command";

pub const DEFAULT_REPORT_FILENAME: &str = "multiqc_qc_classified.json";

/// Run identifiers embedded in the invocation command line, e.g.
/// `230725_A01303_0234_AHHLGMDRX3_CEN-CEN-230726_1357-multiqc`.
const RUN_ID_PATTERN: &str = "[0-9]{6}_[A-Z0-9]{6}_[0-9]{4}_[A-Z0-9a-z_-]+multiqc";

/// Folds per-sample classifications and the rule catalog into the final
/// report. Sample order follows the order reports were produced in; metric
/// and band order follow the catalog. Inputs are not mutated.
pub fn assemble(
    sample_reports: &[SampleReport],
    catalog: &RuleCatalog,
    index: &MetricKeyIndex,
) -> anyhow::Result<Report> {
    let mut summary = IndexMap::new();
    let mut details = IndexMap::new();
    for report in sample_reports {
        summary.insert(report.sample_id.clone(), report.status);
        details.insert(report.sample_id.clone(), report.metrics.clone());
    }

    let mut thresholds = IndexMap::new();
    for config_field in catalog.fields() {
        let rules = match catalog.rules_for(config_field) {
            Ok(rules) => rules,
            Err(err) => {
                tracing::warn!(%err, "skipping thresholds entry");
                continue;
            }
        };
        let metric_key = index.resolve(config_field)?;
        thresholds.insert(metric_key.to_string(), rules.clone());
    }

    Ok(Report {
        summary,
        details,
        thresholds,
    })
}

/// Names the report after the run identifier found in the export's
/// provenance command, falling back to a fixed name when it cannot be
/// parsed.
pub fn output_filename(store: &FlattenedMetricStore) -> String {
    let command = store.get(PROVENANCE_COMMAND_KEY).and_then(MetricValue::as_text);
    match command {
        Some(command) => match run_id(command) {
            Some(id) => format!("{id}.json"),
            None => {
                tracing::warn!(
                    command,
                    "run identifier not found in provenance command, using default report name"
                );
                DEFAULT_REPORT_FILENAME.to_string()
            }
        },
        None => {
            tracing::warn!("provenance command missing from export, using default report name");
            DEFAULT_REPORT_FILENAME.to_string()
        }
    }
}

fn run_id(command: &str) -> Option<String> {
    let pattern = Regex::new(RUN_ID_PATTERN).ok()?;
    pattern.find(command).map(|m| m.as_str().to_string())
}
