use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::HarnessError;
use crate::exec::target::target_exists;
use crate::request::AnalysisRequest;

/// Check whether `name` can be started at all.
///
/// Runs `<name> --version` with every stream discarded. Only the spawn
/// matters; a tool that rejects `--version` still counts as installed.
pub fn is_installed(name: &str) -> bool {
    let spawned = Command::new(name)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match spawned {
        Ok(status) => {
            debug!(analyzer = name, ?status, "version check finished");
            true
        }
        Err(e) => {
            debug!(analyzer = name, error = %e, "version check failed to start");
            false
        }
    }
}

/// Gate a run on the analyzer being invocable and the target existing.
///
/// The analyzer is checked first; no analysis process is launched if
/// either check fails.
pub fn check(request: &AnalysisRequest) -> Result<(), HarnessError> {
    if !is_installed(&request.analyzer) {
        warn!(analyzer = %request.analyzer, "analyzer is not installed");
        return Err(HarnessError::ToolUnavailable {
            analyzer: request.analyzer.clone(),
        });
    }

    if !target_exists(&request.target_path) {
        warn!(target = %request.target_path.display(), "target can not be found");
        return Err(HarnessError::TargetMissing {
            path: request.target_path.clone(),
        });
    }

    Ok(())
}
