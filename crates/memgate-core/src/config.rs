use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::request::{AnalysisRequest, SummaryMarkers};

pub const DEFAULT_ANALYZER: &str = "valgrind";

pub const DEFAULT_OPTION_FLAGS: [&str; 4] = [
    "--leak-check=full",
    "--show-leak-kinds=all",
    "--track-origins=yes",
    "--verbose",
];

pub const DEFAULT_BEGIN_MARKER: &str = "ERROR SUMMARY: ";
pub const DEFAULT_END_MARKER: &str = "errors";

/// Harness settings, optionally read from a TOML file.
///
/// Missing keys fall back to the valgrind invocation contract, so an empty
/// file is equivalent to no file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub analyzer: String,
    pub option_flags: Vec<String>,
    /// Overrides the parser registered for `analyzer` when set.
    pub begin_marker: Option<String>,
    pub end_marker: Option<String>,
    pub log_dir: PathBuf,
    pub timeout_secs: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            analyzer: DEFAULT_ANALYZER.to_string(),
            option_flags: DEFAULT_OPTION_FLAGS.iter().map(|f| f.to_string()).collect(),
            begin_marker: None,
            end_marker: None,
            log_dir: PathBuf::from("."),
            timeout_secs: None,
        }
    }
}

impl HarnessConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Bind this configuration to a concrete target.
    ///
    /// Setting either marker makes the pair explicit; the unset half takes
    /// the valgrind default.
    pub fn into_request(self, target_path: PathBuf, target_arguments: Vec<String>) -> AnalysisRequest {
        let markers = match (self.begin_marker, self.end_marker) {
            (None, None) => None,
            (begin, end) => Some(SummaryMarkers {
                begin: begin.unwrap_or_else(|| DEFAULT_BEGIN_MARKER.to_string()),
                end: end.unwrap_or_else(|| DEFAULT_END_MARKER.to_string()),
            }),
        };

        AnalysisRequest {
            analyzer: self.analyzer,
            option_flags: self.option_flags,
            target_path,
            target_arguments,
            markers,
            log_dir: self.log_dir,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
