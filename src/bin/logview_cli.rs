//! CLI tool for logview - prints the view rows of a log document
//!
//! Usage:
//!   logview_cli log.json                       # All records, annotations from the document
//!   logview_cli log.json --apid APP1 --apid X  # Only records of the given applications
//!   logview_cli log.json -a notes.json --dark  # Extra annotations, dark theme colors
//!   logview_cli log.json --all-columns         # Every fixed column, not just the payload
//!
//! Output is a header line, then one tab-separated line per view row:
//! `view  filtered  raw  color  <columns>`

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use logview::memlog::{LogDocument, LogRecord, MemoryLog};
use logview::{Annotation, Column, LogTableModel, NoMarkerRules, Result, UiTheme, ViewerConfig};

/// Print the rows a log table viewer would show for a log document.
#[derive(Parser, Debug)]
#[command(name = "logview_cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log document (JSON with `records` and optional `annotations`)
    log: PathBuf,

    /// Additional annotations (JSON array)
    #[arg(short, long)]
    annotations: Option<PathBuf>,

    /// Keep only records of this application id (repeatable)
    #[arg(long = "apid")]
    app_ids: Vec<String>,

    /// Viewer settings (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use dark theme colors
    #[arg(long)]
    dark: bool,

    /// Print every fixed column instead of the payload only
    #[arg(long)]
    all_columns: bool,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &cli.log_level);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "logview_cli failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins when set and valid, then `--log-level`, then "warn".
fn log_filter(from_env: Option<String>, log_level: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn header(columns: &[Column]) -> String {
    let names: Vec<String> = columns.iter().map(|c| c.name()).collect();
    format!("view\tfiltered\traw\tcolor\t{}", names.join("\t"))
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::from_json(&fs::read_to_string(path)?)?,
        None => ViewerConfig::default(),
    };
    if cli.dark {
        config.theme = UiTheme::Dark;
    }

    let document = LogDocument::from_json(&fs::read_to_string(&cli.log)?)?;
    let mut annotations = document.annotations;
    if let Some(path) = &cli.annotations {
        let extra: Vec<Annotation> = serde_json::from_str(&fs::read_to_string(path)?)?;
        annotations.extend(extra);
    }

    let mut log = MemoryLog::new(document.records);
    if !cli.app_ids.is_empty() {
        log.apply_filter(|record| cli.app_ids.iter().any(|id| *id == record.app_id));
    }
    info!(
        records = log.len(),
        filtered = log.filtered().len(),
        annotations = annotations.len(),
        "log loaded"
    );

    let mut model: LogTableModel<LogRecord> = LogTableModel::new(&config)?;
    let rows = model.filter_changed(&log, &annotations)?;

    let columns: &[Column] = if cli.all_columns {
        &Column::FIXED
    } else {
        &[Column::Payload]
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{}", header(columns))?;
    for row in 0..rows {
        let filtered = model
            .view_to_filtered(row)
            .map_or_else(|| "-".to_string(), |f| f.to_string());
        let raw = model
            .view_to_raw(row, &log)
            .map_or_else(|| "-".to_string(), |r| r.to_string());
        let color = model
            .cell_color(row, &log, &log, &NoMarkerRules)
            .map(|c| c.to_hex())
            .unwrap_or_default();
        let cells: Vec<String> = columns
            .iter()
            .map(|&column| model.cell_text(row, column, &log, &log).unwrap_or_default())
            .collect();
        writeln!(out, "{row}\t{filtered}\t{raw}\t{color}\t{}", cells.join("\t"))?;
    }
    out.flush()?;

    let stats = model.cache_stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "decode cache"
    );
    Ok(())
}
