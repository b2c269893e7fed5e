use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_MAPPING_FILE: &str = "resources/field_metric_map.json";

#[derive(Parser, Debug)]
#[command(
    name = "qcgate",
    version,
    about = "Pass/warn/fail QC classification for sequencing run metric exports"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every sample in a run and write the report
    Classify {
        /// Sample sheet listing the run's samples
        samplesheet: PathBuf,
        /// Aggregated metric export (JSON)
        data: PathBuf,
        /// Rule config (YAML) with per-metric threshold conditions
        config: PathBuf,
        #[arg(
            long,
            default_value = DEFAULT_MAPPING_FILE,
            help = "Config-field to metric-key mapping table"
        )]
        mapping: PathBuf,
        #[arg(long, default_value = ".", help = "Directory the report is written to")]
        out_dir: PathBuf,
    },
    /// Check that the rule config and mapping table agree
    Validate {
        /// Rule config (YAML) with per-metric threshold conditions
        config: PathBuf,
        #[arg(
            long,
            default_value = DEFAULT_MAPPING_FILE,
            help = "Config-field to metric-key mapping table"
        )]
        mapping: PathBuf,
    },
}
