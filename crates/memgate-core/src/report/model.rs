use serde::{Deserialize, Serialize};

use crate::SCHEMA_VERSION;
use crate::outcome::Outcome;
use crate::transcript::log::LogArtifact;

/// Number of defects an analyzer reported for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefectCount(pub u64);

impl DefectCount {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for DefectCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a completed pipeline pass produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub analyzer: String,
    pub target: ArtifactInfo,
    pub log: LogArtifact,
    pub defects: DefectCount,
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
    pub commit: Option<String>,
}

/// The binary under analysis, bound by content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub path: String,
    pub size_bytes: u64,
    pub hash: ArtifactHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHash {
    pub algorithm: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Clean,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: String,
    pub message: String,
}

/// Machine-readable record of one run, written with `--summary-out`.
///
/// Fields that a failed run never reached are `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub analyzer: String,
    pub target: Option<ArtifactInfo>,
    pub log_path: Option<String>,
    pub defect_count: Option<DefectCount>,
    pub status: RunStatus,
    pub error: Option<ErrorInfo>,
    pub exit_code: i32,
}

impl Summary {
    pub fn new(
        tool: ToolInfo,
        analyzer: &str,
        report: Option<&RunReport>,
        outcome: &Outcome,
    ) -> Self {
        let (status, error) = match outcome {
            Outcome::Clean => (RunStatus::Clean, None),
            Outcome::Failed(e) => (
                RunStatus::Failed,
                Some(ErrorInfo {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                }),
            ),
        };

        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            analyzer: analyzer.to_string(),
            target: report.map(|r| r.target.clone()),
            log_path: report.map(|r| r.log.path.display().to_string()),
            defect_count: report.map(|r| r.defects),
            status,
            error,
            exit_code: outcome.exit_code(),
        }
    }
}
