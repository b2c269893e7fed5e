use crate::cli::{Cli, Commands};
use crate::services::resolver::RescaleTable;
use crate::services::{classify, loaders, output, report};

pub fn handle_classify(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Classify {
        samplesheet,
        data,
        config,
        mapping,
        out_dir,
    } = &cli.command
    else {
        return Ok(false);
    };

    let samples = loaders::load_sample_list(samplesheet)?;
    let store = loaders::load_store(data)?;
    let catalog = loaders::load_catalog(config)?;
    let index = loaders::load_index(mapping)?;
    let rescale = RescaleTable::default();

    let mut sample_reports = Vec::with_capacity(samples.len());
    for sample_id in &samples {
        sample_reports.push(classify::classify(
            sample_id, &store, &index, &catalog, &rescale,
        )?);
    }

    let qc_report = report::assemble(&sample_reports, &catalog, &index)?;
    let filename = report::output_filename(&store);
    let path = output::write_report(&qc_report, out_dir, &filename)?;
    tracing::info!(report = %path.display(), samples = samples.len(), "classification complete");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&qc_report)?);
    } else {
        for (sample_id, status) in &qc_report.summary {
            println!("{sample_id}\t{status}");
        }
        println!("report written to {}", path.display());
    }
    Ok(true)
}
