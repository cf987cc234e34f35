//! Trait abstraction for submission delivery to enable mocking in tests

use crate::request::Submission;
use anyhow::Result;
use async_trait::async_trait;

/// Receives validated submissions. Delivery is fire-and-forget: no receipt
/// beyond success or failure is expected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Hand a validated submission over
    async fn deliver(&self, submission: &Submission) -> Result<()>;

    /// Short name for status and log lines
    fn name(&self) -> &'static str;
}
