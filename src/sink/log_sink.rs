//! Sink that records each submission as a structured log event

use super::traits::SubmissionSink;
use crate::request::Submission;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Writes the submission payload to the `intake::submission` log target
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    pretty: bool,
}

impl LogSink {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    #[cfg(test)]
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

#[async_trait]
impl SubmissionSink for LogSink {
    async fn deliver(&self, submission: &Submission) -> Result<()> {
        let payload = submission
            .to_json(self.pretty)
            .context("Failed to serialize submission")?;
        tracing::info!(
            target: "intake::submission",
            id = %submission.id,
            attachments = submission.request.attachments.len(),
            "{payload}"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
