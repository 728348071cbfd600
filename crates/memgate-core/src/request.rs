use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Substrings that bracket the defect count on an analyzer's summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMarkers {
    pub begin: String,
    pub end: String,
}

/// Everything needed to run one analyzer against one target.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Executable name or path of the analyzer.
    pub analyzer: String,

    /// Flags passed to the analyzer before the target path.
    pub option_flags: Vec<String>,

    pub target_path: PathBuf,

    /// Forwarded to the target binary after its path.
    pub target_arguments: Vec<String>,

    /// Explicit summary markers. `None` defers to the parser registered
    /// for the analyzer.
    pub markers: Option<SummaryMarkers>,

    /// Directory that receives `<analyzer>-results.log`.
    pub log_dir: PathBuf,

    /// `None` waits for the analyzer indefinitely.
    pub timeout: Option<Duration>,
}

impl AnalysisRequest {
    /// Short analyzer name: the file name of `analyzer` when it is a path.
    pub fn analyzer_name(&self) -> &str {
        Path::new(&self.analyzer)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.analyzer)
    }

    /// `[analyzer] + option_flags + [target_path] + target_arguments`.
    pub fn command_line(&self) -> Vec<OsString> {
        let mut cmd = Vec::with_capacity(self.option_flags.len() + self.target_arguments.len() + 2);
        cmd.push(OsString::from(&self.analyzer));
        cmd.extend(self.option_flags.iter().map(OsString::from));
        cmd.push(self.target_path.clone().into_os_string());
        cmd.extend(self.target_arguments.iter().map(OsString::from));
        cmd
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("{}-results.log", self.analyzer_name()))
    }
}
