//! Verdict for a harness run.
//!
//! Internally every run ends in a typed [`Outcome`]; only the CLI turns it
//! into a process exit status, via [`Outcome::exit_code`].
//!
//! Exit code mapping:
//!
//!   - clean run, zero defects      → 0
//!   - defects reported             → 1
//!   - any precondition/run failure → 1

use tracing::info;

use crate::error::HarnessError;
use crate::report::model::RunReport;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug)]
pub enum Outcome {
    Clean,
    Failed(HarnessError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Clean => EXIT_SUCCESS,
            Outcome::Failed(_) => EXIT_FAILURE,
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Outcome::Clean)
    }
}

/// Turn a pipeline result into a verdict.
///
/// A positive defect count becomes [`HarnessError::DefectsReported`]; any
/// earlier failure is passed through untouched.
pub fn decide(result: Result<RunReport, HarnessError>) -> Outcome {
    match result {
        Ok(report) if report.defects.is_zero() => {
            info!(analyzer = %report.analyzer, "no defects reported");
            Outcome::Clean
        }
        Ok(report) => Outcome::Failed(HarnessError::DefectsReported {
            analyzer: report.analyzer,
            count: report.defects.0,
        }),
        Err(e) => Outcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{ArtifactHash, ArtifactInfo, DefectCount};
    use crate::transcript::log::LogArtifact;
    use std::path::PathBuf;

    fn report(defects: u64) -> RunReport {
        RunReport {
            analyzer: "valgrind".into(),
            target: ArtifactInfo {
                path: "./app".into(),
                size_bytes: 0,
                hash: ArtifactHash {
                    algorithm: "sha256".into(),
                    value: String::new(),
                },
            },
            log: LogArtifact {
                path: PathBuf::from("valgrind-results.log"),
                lines: 1,
            },
            defects: DefectCount(defects),
        }
    }

    #[test]
    fn zero_defects_is_clean() {
        let outcome = decide(Ok(report(0)));
        assert!(outcome.is_clean());
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn defects_fail_with_analyzer_and_count() {
        match decide(Ok(report(3))) {
            Outcome::Failed(e @ HarnessError::DefectsReported { .. }) => {
                assert_eq!(e.to_string(), "valgrind found 3 errors!");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn earlier_failures_pass_through() {
        let outcome = decide(Err(HarnessError::MarkerNotFound {
            analyzer: "valgrind".into(),
            marker: "ERROR SUMMARY: ".into(),
        }));
        assert_eq!(outcome.exit_code(), EXIT_FAILURE);
        assert!(matches!(
            outcome,
            Outcome::Failed(HarnessError::MarkerNotFound { .. })
        ));
    }

    #[test]
    fn every_failure_kind_exits_one() {
        let failures = vec![
            HarnessError::ToolUnavailable {
                analyzer: "valgrind".into(),
            },
            HarnessError::TargetMissing {
                path: PathBuf::from("./missing_binary"),
            },
            HarnessError::ProcessLaunch {
                analyzer: "valgrind".into(),
                source: std::io::Error::other("spawn"),
            },
            HarnessError::InvalidCount {
                line: "ERROR SUMMARY: ? errors".into(),
            },
        ];

        for e in failures {
            assert_eq!(decide(Err(e)).exit_code(), 1);
        }
        assert_eq!(decide(Ok(report(1))).exit_code(), 1);
    }
}
