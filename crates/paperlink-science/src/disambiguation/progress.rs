use serde::Serialize;
use tracing::info;

/// Summary of one ranked candidate, sent before its papers are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateReport {
    pub researcher: String,
    pub candidate_id: String,
    pub paper_count: usize,
    /// Known co-authors and how often they appear, most frequent first.
    pub overlap: Vec<(String, usize)>,
    pub aliases: Vec<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl CandidateReport {
    pub fn total_overlap(&self) -> usize {
        self.overlap.iter().map(|(_, n)| n).sum()
    }
}

/// Receives progress reports. Purely informational.
pub trait ProgressObserver: Send + Sync {
    fn candidate(&self, report: &CandidateReport);
}

/// Logs each report through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn candidate(&self, report: &CandidateReport) {
        info!(
            researcher = %report.researcher,
            id = %report.candidate_id,
            papers = report.paper_count,
            overlap = report.total_overlap(),
            start_year = ?report.start_year,
            end_year = ?report.end_year,
            "candidate {} for {}: {:?}, aliases {:?}",
            report.candidate_id,
            report.researcher,
            report.overlap,
            report.aliases
        );
    }
}

/// Ignores all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn candidate(&self, _report: &CandidateReport) {}
}
