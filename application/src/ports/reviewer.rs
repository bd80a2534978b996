//! Report reviewer port
//!
//! Checks a written [`FinalReport`] before it is scored. A reviewer may
//! return the report unchanged, edit it, or reject it.

use async_trait::async_trait;
use research_domain::FinalReport;
use thiserror::Error;

/// Errors that can occur while reviewing the report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReviewerError {
    #[error("Report review failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait ReportReviewer: Send + Sync {
    /// Review `report`, written for `query`, and return the version to score.
    async fn review(&self, query: &str, report: FinalReport) -> Result<FinalReport, ReviewerError>;
}

/// Pass-through reviewer used when no review step is configured.
pub struct NoReview;

#[async_trait]
impl ReportReviewer for NoReview {
    async fn review(&self, _query: &str, report: FinalReport) -> Result<FinalReport, ReviewerError> {
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_review_returns_report_unchanged() {
        let report = FinalReport::new("Humanoid robots");
        let reviewed = NoReview.review("humanoid robots", report.clone()).await.unwrap();
        assert_eq!(reviewed, report);
    }
}
