//! One command-line run: resolve settings, fetch, normalize, report.

use crate::report;
use anyhow::Context;
use salesboard_core::config::Config;
use salesboard_core::summary::{top_by_amount, Summary};
use salesboard_core::{MappingOverrides, Pipeline, ProgressEvent};
use salesboard_notion::NotionClient;
use std::io::Write;
use std::path::PathBuf;

/// Environment variable holding the Notion integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per canonical record.
    Jsonl,
    /// Totals and groupings as text.
    Summary,
}

/// Settings gathered from the command line. `None` falls back to the
/// config file.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub database_id: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// `field=Property` assignments; these win over `[mapping]`.
    pub mappings: Vec<String>,
    pub format: OutputFormat,
    pub top: usize,
    pub config_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            database_id: None,
            base_url: None,
            api_key: None,
            mappings: Vec::new(),
            format: OutputFormat::Summary,
            top: 10,
            config_path: None,
        }
    }
}

/// Execute one run, writing the report to `out`. Returns the number of
/// canonical records produced.
pub async fn run<W, P>(options: RunOptions, out: &mut W, on_progress: P) -> anyhow::Result<usize>
where
    W: Write,
    P: FnMut(ProgressEvent),
{
    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config file unusable, using defaults");
            Config::defaults()
        }),
    };
    if let Some(database_id) = options.database_id {
        config.source.database_id = database_id;
    }
    if let Some(base_url) = options.base_url {
        config.source.base_url = base_url;
    }

    let api_key = options
        .api_key
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .unwrap_or_default();
    let client = NotionClient::new(&config.source, api_key)?;

    let mut cli_overrides = MappingOverrides::new();
    for assignment in &options.mappings {
        cli_overrides.parse_assignment(assignment)?;
    }
    let overrides = config.mapping_overrides()?.merged_with(&cli_overrides);

    let pipeline = Pipeline::new(client, &config.pager);
    let records = pipeline
        .run(&overrides, on_progress)
        .await
        .context("loading database records")?;

    match options.format {
        OutputFormat::Jsonl => report::write_jsonl(&records, out)?,
        OutputFormat::Summary => {
            let summary = Summary::from_records(&records);
            let top = top_by_amount(&records, options.top);
            out.write_all(report::render_summary(&summary, &top).as_bytes())?;
        }
    }
    out.flush()?;

    Ok(records.len())
}
