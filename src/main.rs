use clap::{Parser, ValueEnum};
use salesboard::{OutputFormat, RunOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "salesboard", about = "Load a Notion sales database and summarize it")]
struct Cli {
    /// Database to query (overrides [source].database_id).
    #[arg(long)]
    database_id: Option<String>,

    /// Query proxy base URL (overrides [source].base_url).
    #[arg(long)]
    base_url: Option<String>,

    /// Notion integration token. Defaults to $NOTION_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Pin a canonical field to a property, e.g. `--map customer=의원명`. Repeatable.
    #[arg(long = "map", value_name = "FIELD=PROPERTY")]
    map: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Number of records listed in the summary's top-by-amount section.
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Config file to use instead of ~/.config/salesboard/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/salesboard-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Jsonl,
    Summary,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/salesboard-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("salesboard debug log started: tail -f /tmp/salesboard-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }

    let options = RunOptions {
        database_id: cli.database_id,
        base_url: cli.base_url,
        api_key: cli.api_key,
        mappings: cli.map,
        format: match cli.format {
            Format::Jsonl => OutputFormat::Jsonl,
            Format::Summary => OutputFormat::Summary,
        },
        top: cli.top,
        config_path: cli.config,
    };

    let mut stdout = std::io::stdout().lock();
    salesboard::run(options, &mut stdout, |event| {
        eprintln!("[{:>3}%] {}", event.percent, event.message);
    })
    .await?;
    Ok(())
}
