//! Output renderers and formatting helpers for CLI commands.

use std::collections::{BTreeMap, HashMap};

use anyhow::anyhow;
use seedbridge_transmission::{InjectionOutcome, TorrentCompletion};
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

pub(crate) fn render_download_dir(
    info_hash: &str,
    download_dir: &str,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "infoHash": info_hash,
            "downloadDir": download_dir,
        })),
        OutputFormat::Table => {
            println!("{download_dir}");
            Ok(())
        }
    }
}

pub(crate) fn render_download_dirs(
    dirs: &HashMap<String, String>,
    format: OutputFormat,
) -> CliResult<()> {
    let sorted: BTreeMap<&str, &str> = dirs
        .iter()
        .map(|(hash, dir)| (hash.as_str(), dir.as_str()))
        .collect();
    match format {
        OutputFormat::Json => print_json(&sorted),
        OutputFormat::Table => {
            print!("{}", format_download_dirs(&sorted));
            Ok(())
        }
    }
}

pub(crate) fn render_completion(
    info_hash: &str,
    completion: TorrentCompletion,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "infoHash": info_hash,
            "completion": completion,
        })),
        OutputFormat::Table => {
            println!("{info_hash}: {}", completion_to_str(completion));
            Ok(())
        }
    }
}

pub(crate) fn render_outcome(outcome: InjectionOutcome, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({ "outcome": outcome })),
        OutputFormat::Table => {
            println!("{outcome}");
            Ok(())
        }
    }
}

pub(crate) fn format_download_dirs(dirs: &BTreeMap<&str, &str>) -> String {
    let mut text = format!("{:<40} DOWNLOAD DIR\n", "INFO HASH");
    for (hash, dir) in dirs {
        text.push_str(&format!("{hash:<40} {dir}\n"));
    }
    text
}

pub(crate) const fn completion_to_str(completion: TorrentCompletion) -> &'static str {
    match completion {
        TorrentCompletion::Complete => "complete",
        TorrentCompletion::Incomplete => "incomplete",
        TorrentCompletion::NotFound => "not found",
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}
