use crate::domain::models::JsonOut;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn write_report<T: Serialize>(
    report: &T,
    dir: &Path,
    filename: &str,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}
