//! Application state and core logic

use crate::config::IntakeConfig;
use crate::request::{assemble, FileRef, OptionCatalog};
use crate::sink::{LogSink, SubmissionSink};
use crate::state::{AppState, FieldKind, Form, FormAction, Receipt, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;

/// Separator accepted between several paths typed in one pick
const PATH_SEPARATOR: char = ';';

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where validated submissions are delivered
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance from user configuration
    pub fn new(config: &IntakeConfig) -> Self {
        let sink = LogSink::new(config.pretty_payload());
        Self::with_sink(config.catalog(), Box::new(sink))
    }

    pub fn with_sink(catalog: OptionCatalog, sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            state: AppState::new(catalog),
            sink,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key).await?,
            View::Receipt => self.handle_receipt_key(key),
        }
        Ok(())
    }

    /// Handle keys in the form view
    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_action_panel = self.state.form.is_actions_focused();
        let kind = self.state.form.active_kind();
        let has_options = kind.is_some_and(FieldKind::has_options);
        let on_files = kind == Some(FieldKind::Files);

        match key.code {
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit().await;
            }
            KeyCode::Char('w') if key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER) => {
                self.submit().await;
            }
            KeyCode::Char('l') if key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER) => {
                self.reset_form();
            }
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            KeyCode::Esc => self.state.form.focus_actions(),
            // Up/Down for action panel navigation
            KeyCode::Up | KeyCode::Char('k') if on_action_panel => self.state.form.prev_button(),
            KeyCode::Down | KeyCode::Char('j') if on_action_panel => {
                self.state.form.next_button();
            }
            // Enter on action panel triggers selected button
            KeyCode::Enter if on_action_panel => match self.state.form.selected_action() {
                FormAction::Submit => self.submit().await,
                FormAction::Reset => self.reset_form(),
            },
            KeyCode::Up => {
                if !(on_files && self.state.form.move_attachment_cursor(false)) {
                    self.state.form.prev_field();
                }
            }
            KeyCode::Down => {
                if !(on_files && self.state.form.move_attachment_cursor(true)) {
                    self.state.form.next_field();
                }
            }
            KeyCode::Left if has_options => self.state.form.move_option(false),
            KeyCode::Right if has_options => self.state.form.move_option(true),
            KeyCode::Delete if on_files => self.remove_attachment(),
            KeyCode::Enter => match kind {
                Some(FieldKind::Multiline) => self.state.form.newline(),
                Some(FieldKind::Files) => self.pick_files(),
                Some(k) if k.has_options() => self.state.form.select_option(),
                _ => self.state.form.next_field(),
            },
            // Form field input (only when not on action panel)
            KeyCode::Char(c)
                if !on_action_panel && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.state.form.input_char(c);
            }
            KeyCode::Backspace if !on_action_panel => self.state.form.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys on the receipt view
    fn handle_receipt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n') => {
                self.state.start_new_request();
                self.status_message = None;
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Validate and, when clean, deliver the request
    async fn submit(&mut self) {
        let submission = match assemble(&self.state.form.request) {
            Ok(submission) => submission,
            Err(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.name()).collect();
                tracing::info!(
                    errors = errors.len(),
                    fields = %fields.join(","),
                    "Submission rejected by validation"
                );
                self.status_message = Some(format!(
                    "Corrija {} campo(s) antes de enviar",
                    errors.len()
                ));
                self.state.form.show_errors(errors);
                return;
            }
        };

        match self.sink.deliver(&submission).await {
            Ok(()) => {
                tracing::info!(
                    id = %submission.id,
                    sink = self.sink.name(),
                    "Submission delivered"
                );
                self.state
                    .show_receipt(Receipt::from_submission(&submission, self.sink.name()));
                self.status_message = Some("Solicitud enviada".to_string());
            }
            Err(e) => {
                tracing::warn!(id = %submission.id, "Submission delivery failed: {e:#}");
                self.push_error(format!("No se pudo enviar la solicitud: {e}"));
            }
        }
    }

    fn reset_form(&mut self) {
        self.state.form.reset();
        self.status_message = Some("Formulario limpiado".to_string());
    }

    /// Turn the typed path(s) into attachments. Paths that are not regular
    /// files are reported and skipped.
    fn pick_files(&mut self) {
        let Some(raw) = self.state.form.take_pending_path() else {
            return;
        };

        let mut picked = Vec::new();
        let mut missing = Vec::new();
        for entry in raw.split(PATH_SEPARATOR).map(str::trim).filter(|p| !p.is_empty()) {
            let path = Path::new(entry);
            match FileRef::from_path(path).filter(|_| path.is_file()) {
                Some(file) => picked.push(file),
                None => missing.push(entry.to_string()),
            }
        }

        if !missing.is_empty() {
            tracing::warn!("Rejected file pick: {}", missing.join(", "));
            self.push_error(format!("No se encontró el archivo: {}", missing.join(", ")));
        }
        if picked.is_empty() {
            return;
        }

        let offered = picked.len();
        let added = self.state.form.attach(picked);
        self.status_message = Some(if added == offered {
            format!("{added} archivo(s) adjuntado(s)")
        } else {
            format!("{added} archivo(s) adjuntado(s), {} repetido(s)", offered - added)
        });
    }

    fn remove_attachment(&mut self) {
        match self.state.form.remove_selected_attachment() {
            Ok(Some(file)) => {
                self.status_message = Some(format!("Eliminado: {}", file.name));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Attachment removal out of bounds: {e}"),
        }
    }
}
