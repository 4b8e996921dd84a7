//! CLI entry point for `spam-features`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use spam_features::{
    Config, CorpusScanner, CsvSink, DirectorySource, FeatureExtractor, Label, RecordSink,
    ScanReport, SkippedFile,
};

/// Extract spam-classification features from labeled email corpora.
#[derive(Parser)]
#[command(name = "spam-features", version)]
struct Cli {
    /// TOML configuration file (defaults to $SPAM_FEATURES_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of spam emails
    #[arg(long, value_name = "DIR")]
    spam_dir: Option<PathBuf>,

    /// Directory of ham emails
    #[arg(long, value_name = "DIR")]
    ham_dir: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Summary<'a> {
    output: &'a Path,
    records: usize,
    spam: usize,
    ham: usize,
    skipped: &'a [SkippedFile],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = Config::resolve(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.spam_dir {
        config.spam_dir = dir;
    }
    if let Some(dir) = cli.ham_dir {
        config.ham_dir = dir;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    let report = run(&config)?;
    print_summary(&config.output, &report, cli.json)
}

fn run(config: &Config) -> anyhow::Result<ScanReport> {
    let extractor =
        FeatureExtractor::new(&config.extractor).context("building feature extractor")?;
    let scanner = CorpusScanner::new(extractor);

    let spam = DirectorySource::new(&config.spam_dir, Label::Spam);
    let ham = DirectorySource::new(&config.ham_dir, Label::Ham);
    let report = scanner.scan(&spam, &ham).context("scanning corpora")?;

    CsvSink::new(&config.output)
        .write(&report.records)
        .with_context(|| format!("writing {}", config.output.display()))?;

    Ok(report)
}

fn print_summary(output: &Path, report: &ScanReport, json: bool) -> anyhow::Result<()> {
    let summary = Summary {
        output,
        records: report.records.len(),
        spam: report.spam_count(),
        ham: report.ham_count(),
        skipped: &report.skipped,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Wrote {} records ({} spam, {} ham) to {}; skipped {} files",
            summary.records,
            summary.spam,
            summary.ham,
            output.display(),
            summary.skipped.len()
        );
    }
    Ok(())
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
