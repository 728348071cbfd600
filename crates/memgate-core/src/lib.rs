pub mod config;
pub mod error;
pub mod exec;
pub mod outcome;
pub mod report;
pub mod request;
pub mod transcript;

use std::io::Write;

use tracing::info;

use crate::error::HarnessError;
use crate::report::model::RunReport;
use crate::report::parse::ParserRegistry;
use crate::request::AnalysisRequest;

pub const TOOL_NAME: &str = "memgate";

/// JSON schema version of run summaries.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Run one analysis end to end, short of deciding the verdict.
///
/// Preflight → fingerprint target → run analyzer → write log → parse count.
/// The transcript is logged (and echoed to `console`) before parsing, so a
/// log exists even when no summary marker is found. Pass the result to
/// [`outcome::decide`] for the verdict.
pub fn run_analysis(
    request: &AnalysisRequest,
    registry: &ParserRegistry,
    console: &mut dyn Write,
) -> Result<RunReport, HarnessError> {
    exec::preflight::check(request)?;

    let target = exec::target::fingerprint(&request.target_path)
        .map_err(|e| HarnessError::from_target_io(&request.target_path, e))?;

    info!(analyzer = request.analyzer_name(), target = %target.path, "running analysis");
    let transcript = exec::runner::run_analyzer(request)?;

    let log = transcript::log::write_log(&transcript, &request.log_path(), console)?;
    info!(path = %log.path.display(), lines = log.lines, "wrote transcript log");

    let defects = registry.defect_count(request, &transcript)?;
    info!(%defects, "parsed defect count");

    Ok(RunReport {
        analyzer: request.analyzer_name().to_string(),
        target,
        log,
        defects,
    })
}
