use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::HarnessError;
use crate::transcript::model::Transcript;

/// A transcript persisted to disk by [`write_log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogArtifact {
    pub path: PathBuf,
    pub lines: usize,
}

/// Replace the log at `path` with `transcript`, echoing each line to `console`.
///
/// Any previous file is removed first; nothing is ever appended. Lines are
/// written newline-terminated in their original order. The file is closed
/// on every exit path, including a failed write.
///
/// The file is complete before anything is echoed. A console that stops
/// accepting output (a closed pipe, say) only ends the echo; it never
/// truncates the log or fails the run.
pub fn write_log(
    transcript: &Transcript,
    path: &Path,
    console: &mut dyn Write,
) -> Result<LogArtifact, HarnessError> {
    let log_error = |source: io::Error| HarnessError::LogWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(log_error)?;
    }

    match fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "removed previous log"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(log_error(e)),
    }

    let mut file = BufWriter::new(File::create(path).map_err(log_error)?);
    for line in transcript.lines() {
        writeln!(file, "{line}").map_err(log_error)?;
    }
    file.flush().map_err(log_error)?;
    drop(file);

    for line in transcript.lines() {
        if let Err(e) = writeln!(console, "{line}") {
            warn!(error = %e, "console closed, transcript echo stopped");
            break;
        }
    }

    Ok(LogArtifact {
        path: path.to_path_buf(),
        lines: transcript.len(),
    })
}
