//! Application state definitions

use super::forms::IntakeForm;
use crate::request::{OptionCatalog, Submission};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    /// Confirmation shown after a delivered submission
    Receipt,
}

/// Summary of the last delivered submission
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub requester_name: String,
    pub request_title: String,
    pub attachment_count: usize,
    pub sink: &'static str,
}

impl Receipt {
    pub fn from_submission(submission: &Submission, sink: &'static str) -> Self {
        Self {
            id: submission.id,
            submitted_at: submission.submitted_at,
            requester_name: submission.request.requester_name.clone(),
            request_title: submission.request.request_title.clone(),
            attachment_count: submission.request.attachments.len(),
            sink,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Form
    pub form: IntakeForm,
    pub receipt: Option<Receipt>,

    // Modal error queue, oldest first
    pub error_queue: Vec<String>,
}

impl AppState {
    pub fn new(catalog: OptionCatalog) -> Self {
        Self {
            form: IntakeForm::new(catalog),
            ..Default::default()
        }
    }

    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.first().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        if !self.error_queue.is_empty() {
            self.error_queue.remove(0);
        }
    }

    /// Reset the form and switch to the receipt view
    pub fn show_receipt(&mut self, receipt: Receipt) {
        self.form.reset();
        self.receipt = Some(receipt);
        self.current_view = View::Receipt;
    }

    /// Leave the receipt view for a fresh form
    pub fn start_new_request(&mut self) {
        self.form.reset();
        self.current_view = View::Form;
    }
}
