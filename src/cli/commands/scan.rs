//! The `scan` command: scan a repository, evaluate the rule set,
//! render a report.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::info;

use crate::cli::output;
use crate::config::Config;
use crate::engine::{evaluate, summarize};
use crate::exit_codes;
use crate::rules::load_rules;
use crate::scanner::{scan, DetectorRegistry, NoopLogger, ScanLogger, ScanOptions, TracingLogger};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown report.
    Md,
    /// JSON report.
    Json,
}

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Repository to scan (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Directory containing rule YAML files
    #[arg(short, long, value_name = "DIR")]
    pub rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Trace ignore-pattern and per-file scan decisions
    #[arg(short, long)]
    pub debug: bool,
}

/// Run the scan command, returning the process exit code.
pub async fn execute(args: ScanArgs) -> anyhow::Result<i32> {
    let root = args.path.unwrap_or_else(|| PathBuf::from("."));
    let root = root
        .canonicalize()
        .with_context(|| format!("invalid scan path '{}'", root.display()))?;

    let config = Config::load(&root)?;

    let rules_dir = args
        .rules
        .or_else(|| config.scan.rules_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("rules"));
    let rules = load_rules(&rules_dir).context("loading rules")?;
    info!(rules = rules.len(), "Loaded rule set");

    let format = args.format.unwrap_or_else(|| {
        match config.scan.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Md,
        }
    });

    let extra_ignores = config.scan.ignore.clone();
    let debug = args.debug;

    // The scan is blocking walk-and-read work; run it off the async
    // runtime's core threads.
    let scan_root = root.clone();
    let signals = tokio::task::spawn_blocking(move || {
        let mut patterns = crate::scanner::load_ignore_file(&scan_root);
        patterns.extend(extra_ignores);

        let logger: Arc<dyn ScanLogger> = if debug {
            Arc::new(TracingLogger)
        } else {
            Arc::new(NoopLogger)
        };
        let options = ScanOptions { debug, logger };
        let registry = DetectorRegistry::default_set();
        scan(&scan_root, &patterns, &registry, &options)
    })
    .await
    .context("scan worker panicked")??;

    let findings = evaluate(&rules, &signals);
    let summary = summarize(&findings);

    match format {
        OutputFormat::Json => println!("{}", output::json(summary, &findings, &signals)),
        OutputFormat::Md => println!("{}", output::markdown(summary, &findings, &signals)),
    }

    let code = if summary.high > 0 {
        exit_codes::HIGH_FINDINGS
    } else if summary.medium > 0 || summary.low > 0 {
        exit_codes::WARNINGS
    } else {
        exit_codes::SUCCESS
    };
    Ok(code)
}
