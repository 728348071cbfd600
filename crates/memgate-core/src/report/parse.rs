//! Defect-count extraction from analyzer transcripts.
//!
//! Analyzers report their findings as free-form text. Each supported tool
//! gets a [`ReportParser`] that knows where its summary count lives; the
//! [`ParserRegistry`] picks one by analyzer name. Markers set explicitly on
//! the request always take precedence over the registered parser.

use std::collections::BTreeMap;

use crate::config::{DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER};
use crate::error::HarnessError;
use crate::report::model::DefectCount;
use crate::request::{AnalysisRequest, SummaryMarkers};
use crate::transcript::model::Transcript;

/// Reads a defect count out of one analyzer's transcript.
pub trait ReportParser: Send + Sync {
    fn defect_count(
        &self,
        analyzer: &str,
        transcript: &Transcript,
    ) -> Result<DefectCount, HarnessError>;
}

/// Finds the count between a begin and an end marker on a summary line.
///
/// When several lines carry the begin marker, the last one wins: tools
/// tend to print running totals before the final summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerParser {
    markers: SummaryMarkers,
}

impl MarkerParser {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            markers: SummaryMarkers {
                begin: begin.into(),
                end: end.into(),
            },
        }
    }

    fn parse_line(&self, line: &str) -> Option<u64> {
        let start = line.find(&self.markers.begin)? + self.markers.begin.len();
        let stop = line.find(&self.markers.end)?;
        parse_count(line.get(start..stop)?.trim())
    }
}

impl Default for MarkerParser {
    fn default() -> Self {
        Self::new(DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER)
    }
}

/// Parse a base-10 count, allowing `,` only between well-formed thousands
/// groups (`1,234,567`).
fn parse_count(text: &str) -> Option<u64> {
    let mut groups = text.split(',');
    let head = groups.next()?;
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());

    let mut digits = String::with_capacity(text.len());
    if !all_digits(head) {
        return None;
    }
    digits.push_str(head);

    let mut grouped = false;
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        grouped = true;
        digits.push_str(group);
    }
    if grouped && head.len() > 3 {
        return None;
    }

    digits.parse().ok()
}

impl From<&SummaryMarkers> for MarkerParser {
    fn from(markers: &SummaryMarkers) -> Self {
        Self {
            markers: markers.clone(),
        }
    }
}

impl ReportParser for MarkerParser {
    fn defect_count(
        &self,
        analyzer: &str,
        transcript: &Transcript,
    ) -> Result<DefectCount, HarnessError> {
        let line = transcript
            .lines()
            .iter()
            .rev()
            .find(|l| l.contains(&self.markers.begin))
            .ok_or_else(|| HarnessError::MarkerNotFound {
                analyzer: analyzer.to_string(),
                marker: self.markers.begin.clone(),
            })?;

        self.parse_line(line)
            .map(DefectCount)
            .ok_or_else(|| HarnessError::InvalidCount { line: line.clone() })
    }
}

/// Report parsers keyed by analyzer name.
pub struct ParserRegistry {
    parsers: BTreeMap<String, Box<dyn ReportParser>>,
}

impl ParserRegistry {
    pub fn empty() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Registry with the built-in valgrind summary parser.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("valgrind", MarkerParser::default());
        registry
    }

    pub fn register(&mut self, analyzer: impl Into<String>, parser: impl ReportParser + 'static) {
        self.parsers.insert(analyzer.into(), Box::new(parser));
    }

    pub fn contains(&self, analyzer: &str) -> bool {
        self.parsers.contains_key(analyzer)
    }

    /// Extract the defect count for `request`'s analyzer.
    ///
    /// Lookup order: explicit request markers, then the parser registered
    /// under the analyzer name, then the valgrind summary markers.
    pub fn defect_count(
        &self,
        request: &AnalysisRequest,
        transcript: &Transcript,
    ) -> Result<DefectCount, HarnessError> {
        let analyzer = request.analyzer_name();
        if let Some(markers) = &request.markers {
            return MarkerParser::from(markers).defect_count(analyzer, transcript);
        }
        match self.parsers.get(analyzer) {
            Some(parser) => parser.defect_count(analyzer, transcript),
            None => MarkerParser::default().defect_count(analyzer, transcript),
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
