use crate::cli::{Cli, Commands};
use crate::domain::models::FieldCheck;
use crate::services::output::print_out;
use crate::services::loaders;

/// Catches broken rule/index pairings before a run: every config field in
/// the rule config must resolve to a metric key.
pub fn handle_validate(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Validate { config, mapping } = &cli.command else {
        return Ok(false);
    };

    let catalog = loaders::load_catalog(config)?;
    let index = loaders::load_index(mapping)?;

    let mut checks = Vec::with_capacity(catalog.len());
    for config_field in catalog.fields() {
        let metric_key = index.resolve(config_field)?;
        checks.push(FieldCheck {
            config_field: config_field.to_string(),
            metric_key: metric_key.to_string(),
        });
    }

    print_out(cli.json, &checks, |c| {
        format!("{}\t{}", c.config_field, c.metric_key)
    })?;
    if !cli.json {
        println!("config valid ({} fields)", checks.len());
    }
    Ok(true)
}
