use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::error::HarnessError;
use crate::request::AnalysisRequest;
use crate::transcript::model::Transcript;

/// Run the analyzer against the target and capture its diagnostic stream.
///
/// Stdout is discarded and stderr is captured in full. The analyzer's own
/// exit status is only logged: the verdict comes from the parsed report.
/// Blocks until the analyzer exits, or until `request.timeout` elapses.
pub fn run_analyzer(request: &AnalysisRequest) -> Result<Transcript, HarnessError> {
    let command_line = request.command_line();
    debug!(command = ?command_line, "launching analyzer");

    let mut cmd = Command::new(&request.analyzer);
    cmd.args(command_line.iter().skip(1))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let stderr = match request.timeout {
        None => {
            let output = cmd.output().map_err(|e| launch_error(request, e))?;
            debug!(status = ?output.status, "analyzer exited");
            output.stderr
        }
        Some(limit) => {
            let child = cmd.spawn().map_err(|e| launch_error(request, e))?;
            wait_with_timeout(request, child, limit)?
        }
    };

    let transcript = Transcript::from_stderr(&stderr);
    info!(lines = transcript.len(), "captured analyzer transcript");
    Ok(transcript)
}

fn launch_error(request: &AnalysisRequest, source: io::Error) -> HarnessError {
    HarnessError::ProcessLaunch {
        analyzer: request.analyzer.clone(),
        source,
    }
}

const READER_POLL: Duration = Duration::from_millis(10);

// stderr is drained on its own thread so a chatty analyzer cannot block on
// a full pipe while we wait on it.
fn wait_with_timeout(
    request: &AnalysisRequest,
    mut child: Child,
    limit: Duration,
) -> Result<Vec<u8>, HarnessError> {
    let mut pipe = child
        .stderr
        .take()
        .ok_or_else(|| launch_error(request, io::Error::other("stderr was not captured")))?;

    let deadline = Instant::now() + limit;
    let reader = thread::spawn(move || -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    });

    match child
        .wait_timeout(limit)
        .map_err(|e| launch_error(request, e))?
    {
        Some(status) => debug!(?status, "analyzer exited"),
        None => {
            // Grandchildren may still hold the pipe, so the reader is left
            // detached instead of joined.
            let _ = child.kill();
            let _ = child.wait();
            return Err(HarnessError::Timeout {
                analyzer: request.analyzer.clone(),
                limit,
            });
        }
    }

    // A grandchild can inherit stderr and outlive the analyzer. The limit
    // covers draining the pipe too.
    while !reader.is_finished() {
        if Instant::now() >= deadline {
            warn!("stderr still open after analyzer exit, abandoning reader");
            return Err(HarnessError::Timeout {
                analyzer: request.analyzer.clone(),
                limit,
            });
        }
        thread::sleep(READER_POLL);
    }

    match reader.join() {
        Ok(result) => result.map_err(|e| launch_error(request, e)),
        Err(_) => Err(launch_error(
            request,
            io::Error::other("stderr reader panicked"),
        )),
    }
}
