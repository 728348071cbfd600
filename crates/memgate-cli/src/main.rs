use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use memgate_core::config::HarnessConfig;
use memgate_core::error::HarnessError;
use memgate_core::outcome::{self, Outcome};
use memgate_core::report::model::{Summary, ToolInfo};
use memgate_core::report::{parse::ParserRegistry, render};
use memgate_core::run_analysis;

mod args;

fn main() -> Result<()> {
    let args = args::Args::parse();
    init_logging();

    let mut config = match &args.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(analyzer) = &args.analyzer {
        config.analyzer = analyzer.clone();
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = dir.clone();
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }

    let request = config.into_request(args.target.clone(), args.arguments.clone());
    tracing::debug!(?request, "built analysis request");
    let registry = ParserRegistry::with_defaults();

    let result = {
        let mut console = std::io::stdout().lock();
        writeln!(console, "{}", render::render_banner(&request))?;
        let result = run_analysis(&request, &registry, &mut console);
        console.flush()?;
        result
    };

    let report = result.as_ref().ok().cloned();
    let outcome = outcome::decide(result);

    match &outcome {
        Outcome::Clean => {}
        Outcome::Failed(e @ HarnessError::DefectsReported { .. }) => println!("{e}"),
        Outcome::Failed(e) => eprintln!("error: {e}"),
    }

    if let Some(path) = &args.summary_out {
        let tool = ToolInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: args.commit.clone(),
        };
        let summary = Summary::new(tool, request.analyzer_name(), report.as_ref(), &outcome);
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("failed to write summary: {}", path.display()))?;
    }

    std::process::exit(outcome.exit_code());
}

// Diagnostics go to stderr so stdout carries only the banner, transcript
// and verdict.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
