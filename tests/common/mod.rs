use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const RUN_COMMAND: &str =
    "multiqc --force ./results 230725_A01303_0234_AHHLGMDRX3_CEN-CEN-230726_1357-multiqc.html";

pub struct TestEnv {
    _tmp: TempDir,
    pub samplesheet: PathBuf,
    pub data: PathBuf,
    pub config: PathBuf,
    pub mapping: PathBuf,
    pub out_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let samplesheet = tmp.path().join("SampleSheet.csv");
        let data = tmp.path().join("multiqc_data.json");
        let config = tmp.path().join("config.yaml");
        let mapping = tmp.path().join("field_metric_map.json");
        let out_dir = tmp.path().join("out");

        fs::write(&samplesheet, fixture_samplesheet()).expect("write sample sheet");
        fs::write(
            &data,
            serde_json::to_string_pretty(&fixture_export()).expect("serialize export"),
        )
        .expect("write metric export");
        fs::write(&config, fixture_config()).expect("write rule config");
        fs::write(
            &mapping,
            serde_json::to_string_pretty(&fixture_mapping()).expect("serialize mapping"),
        )
        .expect("write mapping table");

        Self {
            _tmp: tmp,
            samplesheet,
            data,
            config,
            mapping,
            out_dir,
        }
    }

    pub fn cmd(&self) -> Command {
        cargo_bin_cmd!("qcgate")
    }

    pub fn classify_args(&self) -> Vec<String> {
        vec![
            "classify".to_string(),
            self.samplesheet.to_string_lossy().to_string(),
            self.data.to_string_lossy().to_string(),
            self.config.to_string_lossy().to_string(),
            "--mapping".to_string(),
            self.mapping.to_string_lossy().to_string(),
            "--out-dir".to_string(),
            self.out_dir.to_string_lossy().to_string(),
        ]
    }

    pub fn run_json_classify(&self) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(self.classify_args())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn rewrite_export(&self, export: &Value) {
        fs::write(
            &self.data,
            serde_json::to_string_pretty(export).expect("serialize export"),
        )
        .expect("rewrite metric export");
    }
}

fn fixture_samplesheet() -> &'static str {
    r#"[Header],,,
Date,2023-07-25,,
[Data],,,
Sample_ID,Sample_Name,Index,Index2
sample_1,s1,ATGCATGC,GCTAGCTA
sample_2,s2,TTAATTAA,CCGGCCGG
"#
}

pub fn fixture_export() -> Value {
    serde_json::json!({
        "report_multiqc_command": RUN_COMMAND,
        "report_data_sources": {
            "FastQC": {"all_sections": {"sample_1_L001_R1": "ignored"}}
        },
        "report_general_stats_data": [
            {
                "sample_1": {"FOLD_ENRICHMENT": 1500},
                "sample_2": {"FOLD_ENRICHMENT": 1}
            },
            {
                "sample_1": {"Match_Sexes": true},
                "sample_2": {"Match_Sexes": "false"}
            }
        ],
        "report_saved_raw_data": {
            "multiqc_picard_hsmetrics": {
                "sample_1": {"PCT_TARGET_BASES_20X": 0.99},
                "sample_2": {"PCT_TARGET_BASES_20X": 0.96}
            },
            "multiqc_happy_snp_data": {
                "sample_1_SNP_ALL": {"METRIC": {"Recall_snp": "1.0"}},
                "sample_1_SNP_PASS": {"METRIC": {"Recall_snp": "1.0"}}
            },
            "multiqc_general_stats": {
                "sample_1_L001_R1": {"percent_duplicates": 44.0},
                "sample_1_L001_R2": {"percent_duplicates": 42.74},
                "sample_2_L001_R1": {"percent_duplicates": 41.32},
                "sample_2_L001_R2": {"percent_duplicates": 43.3}
            }
        }
    })
}

fn fixture_config() -> &'static str {
    r#"title: East GLH MultiQC Report
subtitle: Cancer Endocrine Neurology
table_cond_formatting_rules:
  mqc-generalstats-picard-PCT_TARGET_BASES_20X:
    pass: [{lt: 101}]
    warn: [{eq: 98.0}, {lt: 98.0}]
    fail: [{eq: 95.0}, {lt: 95.0}]
  METRIC_Recall_snp:
    pass: [{eq: 1.0}]
    warn: [{lt: 1.0}]
    fail: [{lt: 0.99}]
  Match_Sexes:
    true: [{s_eq: pass}]
    fail: [{s_eq: fail}]
    warn: [{s_eq: NA}]
  FOLD_ENRICHMENT:
    pass: [{gt: 1350}, {lt: 1750}]
    warn: [{eq: 1750}, {gt: 1750}]
    fail: [{lt: 1350}, {eq: 1350}, {eq: 1800}, {gt: 1800}]
  mqc-generalstats-fastqc-percent_duplicates:
    pass: [{lt: 45.0}]
    warn: [{eq: 45.0}, {gt: 45.0}]
    fail: [{eq: 50.0}, {gt: 50.0}]
"#
}

fn fixture_mapping() -> Value {
    serde_json::json!([
        {"Config_field": "mqc-generalstats-picard-PCT_TARGET_BASES_20X", "Header_ID": "PCT_TARGET_BASES_20X"},
        {"Config_field": "METRIC_Recall_snp", "Header_ID": "METRIC.Recall_snp"},
        {"Config_field": "Match_Sexes", "Header_ID": "Match_Sexes"},
        {"Config_field": "FOLD_ENRICHMENT", "Header_ID": "FOLD_ENRICHMENT"},
        {"Config_field": "mqc-generalstats-fastqc-percent_duplicates", "Header_ID": "percent_duplicates"}
    ])
}
