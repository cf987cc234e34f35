//! Submission assembly: validate, then package for the sink

use super::model::RequestForm;
use super::rules::{validate, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A validated request ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub request: RequestForm,
}

impl Submission {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Validate the whole snapshot; only a clean snapshot becomes a submission
pub fn assemble(form: &RequestForm) -> Result<Submission, ValidationErrors> {
    let errors = validate(form);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Submission {
        id: Uuid::new_v4(),
        submitted_at: Utc::now(),
        request: form.clone(),
    })
}
