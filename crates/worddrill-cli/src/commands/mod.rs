pub mod init;
pub mod inspect;
pub mod practice;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use worddrill_core::ingest::IngestReport;
use worddrill_core::model::DatasetKind;
use worddrill_core::traits::DatasetSource;
use worddrill_sources::config::{create_source, load_config_from, DatasetConfig, WorddrillConfig};

/// Where to read a dataset from. `--file` beats `--url` beats `--dataset`.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Named dataset from the config file
    #[arg(long)]
    pub dataset: Option<String>,

    /// Fetch the CSV export from this URL
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the CSV from a local file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Build the source for a dataset of `kind`, along with the loaded config.
pub fn resolve_source(
    kind: DatasetKind,
    args: &SourceArgs,
) -> Result<(Box<dyn DatasetSource>, WorddrillConfig)> {
    let config = load_config_from(args.config.as_deref())?;

    let (name, dataset) = if let Some(path) = &args.file {
        ("file".to_string(), DatasetConfig::file(kind, path))
    } else if let Some(url) = &args.url {
        ("url".to_string(), DatasetConfig::http(kind, url.as_str()))
    } else if let Some(name) = &args.dataset {
        let dataset = config.dataset(name)?;
        if dataset.kind != kind {
            anyhow::bail!(
                "dataset '{name}' holds {}, but {kind} are needed here",
                dataset.kind
            );
        }
        (name.clone(), dataset.clone())
    } else {
        let (name, dataset) = config.dataset_for(kind).with_context(|| {
            format!("no {kind} dataset configured; pass --file, --url or --dataset")
        })?;
        (name.to_string(), dataset.clone())
    };

    tracing::debug!(dataset = %name, %kind, "resolved dataset source");
    let source = create_source(&name, &dataset, config.timeout_secs)?;
    Ok((source, config))
}

/// Explain why a dataset produced no records.
pub fn describe_empty(report: &IngestReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.missing_columns.is_empty() {
        lines.push(format!(
            "Missing required columns: {}",
            report.missing_columns.join(", ")
        ));
    }
    if let Some(detected) = report.detected_kind {
        lines.push(format!("The header looks like a {detected} sheet."));
    }
    if report.missing_columns.is_empty() && report.rows_seen > 0 {
        lines.push(format!(
            "All {} data rows were skipped.",
            report.rows_seen
        ));
    }
    lines
}
