use crate::request::AnalysisRequest;

/// Console line announcing the run, printed before the transcript.
pub fn render_banner(request: &AnalysisRequest) -> String {
    format!(
        "Running memory analysis with {} for target: {} with argument list: {:?}",
        request.analyzer_name(),
        request.target_path.display(),
        request.target_arguments
    )
}
