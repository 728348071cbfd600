use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Every way a harness run can end without a clean verdict.
///
/// All variants are terminal. The CLI maps each of them to exit status 1;
/// callers that need to tell them apart match on the variant or on
/// [`HarnessError::kind`].
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("program {analyzer} is not installed")]
    ToolUnavailable { analyzer: String },

    #[error("file {} can not be found", path.display())]
    TargetMissing { path: PathBuf },

    #[error("file {} can not be read: {source}", path.display())]
    TargetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch {analyzer}: {source}")]
    ProcessLaunch {
        analyzer: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{analyzer} did not finish within {limit:?} and was killed")]
    Timeout { analyzer: String, limit: Duration },

    #[error("failed to write log {}: {source}", path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no line in the {analyzer} transcript contains {marker:?}")]
    MarkerNotFound { analyzer: String, marker: String },

    #[error("could not read a defect count from line {line:?}")]
    InvalidCount { line: String },

    #[error("{analyzer} found {count} errors!")]
    DefectsReported { analyzer: String, count: u64 },
}

impl HarnessError {
    /// Classify an I/O failure on the target: only `NotFound` means missing.
    pub fn from_target_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            HarnessError::TargetMissing {
                path: path.to_path_buf(),
            }
        } else {
            HarnessError::TargetUnreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Stable identifier used in JSON summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            HarnessError::ToolUnavailable { .. } => "tool_unavailable",
            HarnessError::TargetMissing { .. } => "target_missing",
            HarnessError::TargetUnreadable { .. } => "target_unreadable",
            HarnessError::ProcessLaunch { .. } => "process_launch",
            HarnessError::Timeout { .. } => "timeout",
            HarnessError::LogWrite { .. } => "log_write",
            HarnessError::MarkerNotFound { .. } => "marker_not_found",
            HarnessError::InvalidCount { .. } => "invalid_count",
            HarnessError::DefectsReported { .. } => "defects_reported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defects_message_names_analyzer_and_count() {
        let err = HarnessError::DefectsReported {
            analyzer: "valgrind".into(),
            count: 3,
        };
        assert_eq!(err.to_string(), "valgrind found 3 errors!");
        assert_eq!(err.kind(), "defects_reported");
    }

    #[test]
    fn target_missing_message_includes_path() {
        let err = HarnessError::TargetMissing {
            path: PathBuf::from("./missing_binary"),
        };
        assert!(err.to_string().contains("./missing_binary"));
    }

    #[test]
    fn target_io_errors_other_than_not_found_stay_distinct() {
        use std::io::{Error, ErrorKind};
        let path = Path::new("./app");

        let gone = HarnessError::from_target_io(path, Error::from(ErrorKind::NotFound));
        assert_eq!(gone.kind(), "target_missing");

        let denied = HarnessError::from_target_io(path, Error::from(ErrorKind::PermissionDenied));
        assert_eq!(denied.kind(), "target_unreadable");
        assert!(denied.to_string().contains("can not be read"));
        assert!(std::error::Error::source(&denied).is_some());
    }
}
