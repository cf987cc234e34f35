//! Intake form state: the request snapshot plus focus and cursor state

use super::field::{FieldKind, FormField};
use crate::request::{
    validate, visible_fields, AttachmentError, Field, FileRef, OptionCatalog, RequestForm,
    ValidationErrors,
};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// What has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(Field),
    /// The action panel after the last visible field
    Actions,
}

/// Buttons of the action panel, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Reset,
}

impl FormAction {
    pub const ALL: [FormAction; 2] = [FormAction::Submit, FormAction::Reset];

    pub fn label(self) -> &'static str {
        match self {
            FormAction::Submit => "Enviar",
            FormAction::Reset => "Limpiar",
        }
    }
}

/// The request form being filled in
#[derive(Debug, Clone)]
pub struct IntakeForm {
    pub request: RequestForm,
    pub catalog: OptionCatalog,
    pub focus: FormFocus,
    /// Highlighted option inside the focused option field
    pub option_cursor: usize,
    /// Path typed into the attachments field, not yet picked
    pub pending_path: String,
    /// Highlighted entry of the attachment list
    pub attachment_cursor: Option<usize>,
    pub selected_button: usize,
    pub errors: ValidationErrors,
    /// Set after the first failed submit; edits then re-run validation
    pub revalidate: bool,
}

impl IntakeForm {
    pub fn new(catalog: OptionCatalog) -> Self {
        Self {
            request: RequestForm::new(),
            catalog,
            focus: FormFocus::Field(Field::RequesterName),
            option_cursor: 0,
            pending_path: String::new(),
            attachment_cursor: None,
            selected_button: 0,
            errors: ValidationErrors::default(),
            revalidate: false,
        }
    }

    /// Discard everything entered so far
    pub fn reset(&mut self) {
        *self = Self::new(self.catalog.clone());
    }

    /// Focusable fields for the current snapshot, in declaration order
    pub fn focusable_fields(&self) -> Vec<Field> {
        visible_fields(&self.request)
    }

    pub fn active_descriptor(&self) -> Option<FormField> {
        match self.focus {
            FormFocus::Field(field) => Some(FormField::for_field(field)),
            FormFocus::Actions => None,
        }
    }

    pub fn active_kind(&self) -> Option<FieldKind> {
        self.active_descriptor().map(|d| d.kind)
    }

    pub fn is_actions_focused(&self) -> bool {
        self.focus == FormFocus::Actions
    }

    pub fn is_focused(&self, field: Field) -> bool {
        self.focus == FormFocus::Field(field)
    }

    pub fn selected_action(&self) -> FormAction {
        FormAction::ALL
            .get(self.selected_button)
            .copied()
            .unwrap_or(FormAction::Submit)
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % FormAction::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = FormAction::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn focus_actions(&mut self) {
        self.focus = FormFocus::Actions;
    }

    pub fn error_for(&self, field: Field) -> Option<&'static str> {
        self.errors.get(field).map(|e| e.message)
    }

    /// Number of options offered by an option field
    pub fn option_count(&self, field: Field) -> usize {
        let descriptor = FormField::for_field(field);
        match descriptor.kind {
            FieldKind::Choice | FieldKind::YesNo => descriptor.radio_labels().len(),
            FieldKind::MultiSelect => self.catalog.data_types.len(),
            FieldKind::Select => self.catalog.data_frequencies.len(),
            _ => 0,
        }
    }

    /// Option index matching the field's current value, used when focus arrives
    fn current_option_index(&self, field: Field) -> usize {
        let descriptor = FormField::for_field(field);
        match descriptor.kind {
            FieldKind::Choice => self
                .request
                .choice(field)
                .flatten()
                .and_then(|token| descriptor.radio_labels().iter().position(|t| *t == token))
                .unwrap_or(0),
            FieldKind::YesNo => match self.request.flag(field).flatten() {
                Some(false) => 1,
                _ => 0,
            },
            FieldKind::Select => self
                .request
                .data_frequency
                .as_ref()
                .and_then(|o| self.catalog.frequency_index(&o.value))
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn on_focus_changed(&mut self) {
        self.option_cursor = match self.focus {
            FormFocus::Field(field) => self.current_option_index(field),
            FormFocus::Actions => 0,
        };
        self.attachment_cursor = None;
    }

    /// Re-run validation when in re-validate mode
    fn touch(&mut self) {
        if self.revalidate {
            self.errors = validate(&self.request);
        }
    }

    /// Record a failed submit: show errors and keep them in sync from now on
    pub fn show_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
        self.revalidate = true;
        if let Some(first) = self.errors.fields().first() {
            self.focus = FormFocus::Field(*first);
            self.on_focus_changed();
        }
    }

    /// Handle character input on the focused field
    pub fn input_char(&mut self, c: char) {
        let Some(descriptor) = self.active_descriptor() else {
            return;
        };
        match descriptor.kind {
            FieldKind::Text | FieldKind::Multiline => {
                if let Some(text) = self.request.text_mut(descriptor.field) {
                    text.push(c);
                }
            }
            FieldKind::Files => self.pending_path.push(c),
            FieldKind::YesNo => match c {
                's' | 'S' | 'y' | 'Y' => self.set_flag_at(descriptor.field, 0),
                'n' | 'N' => self.set_flag_at(descriptor.field, 1),
                ' ' => self.select_option(),
                _ => {}
            },
            FieldKind::Choice | FieldKind::MultiSelect | FieldKind::Select => {
                if c == ' ' {
                    self.select_option();
                }
            }
        }
        self.touch();
    }

    /// Handle backspace on the focused field
    pub fn backspace(&mut self) {
        let Some(descriptor) = self.active_descriptor() else {
            return;
        };
        match descriptor.kind {
            FieldKind::Text | FieldKind::Multiline => {
                if let Some(text) = self.request.text_mut(descriptor.field) {
                    text.pop();
                }
            }
            FieldKind::Files => {
                self.pending_path.pop();
            }
            _ => {}
        }
        self.touch();
    }

    /// Enter on a multi-line field adds a newline
    pub fn newline(&mut self) {
        if let FormFocus::Field(field) = self.focus {
            if FormField::for_field(field).is_multiline() {
                if let Some(text) = self.request.text_mut(field) {
                    text.push('\n');
                }
                self.touch();
            }
        }
    }

    /// Move the option cursor; radio and select fields follow the cursor
    pub fn move_option(&mut self, forward: bool) {
        let Some(descriptor) = self.active_descriptor() else {
            return;
        };
        let count = self.option_count(descriptor.field);
        if count == 0 {
            return;
        }
        self.option_cursor = if forward {
            (self.option_cursor + 1) % count
        } else if self.option_cursor == 0 {
            count - 1
        } else {
            self.option_cursor - 1
        };
        if descriptor.kind != FieldKind::MultiSelect {
            self.select_option();
        }
        self.touch();
    }

    /// Apply the option under the cursor to the focused field
    pub fn select_option(&mut self) {
        let Some(descriptor) = self.active_descriptor() else {
            return;
        };
        let field = descriptor.field;
        let index = self.option_cursor;
        match descriptor.kind {
            FieldKind::Choice => {
                if let Some(token) = descriptor.radio_labels().get(index) {
                    self.request.set_choice(field, token);
                }
            }
            FieldKind::YesNo => self.set_flag_at(field, index),
            FieldKind::MultiSelect => {
                if let Some(option) = self.catalog.data_type_at(index).cloned() {
                    self.request.toggle_data_type(&option);
                }
            }
            FieldKind::Select => {
                if let Some(option) = self.catalog.data_frequency_at(index).cloned() {
                    self.request.data_frequency = Some(option);
                }
            }
            _ => {}
        }
        self.touch();
    }

    /// Option 0 is "Sí", option 1 is "No"; the widget token never reaches the snapshot
    fn set_flag_at(&mut self, field: Field, index: usize) {
        self.request.set_flag(field, index == 0);
        self.option_cursor = index.min(1);
    }

    /// Take the typed path, clearing the input like a file picker does after each pick
    pub fn take_pending_path(&mut self) -> Option<String> {
        let path = std::mem::take(&mut self.pending_path);
        let trimmed = path.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Add picked files, returning how many were new
    pub fn attach(&mut self, files: Vec<FileRef>) -> usize {
        let added = self.request.attachments.add(files);
        self.touch();
        added
    }

    /// Move the highlight within the attachment list. Returns false when the
    /// move would leave the list, so the caller can move focus instead.
    pub fn move_attachment_cursor(&mut self, down: bool) -> bool {
        let len = self.request.attachments.len();
        if len == 0 {
            return false;
        }
        match (self.attachment_cursor, down) {
            (None, true) => self.attachment_cursor = Some(0),
            (None, false) => return false,
            (Some(i), true) if i + 1 < len => self.attachment_cursor = Some(i + 1),
            (Some(_), true) => return false,
            (Some(0), false) => self.attachment_cursor = None,
            (Some(i), false) => self.attachment_cursor = Some(i - 1),
        }
        true
    }

    /// Remove the highlighted attachment, if the highlight is within bounds
    pub fn remove_selected_attachment(&mut self) -> Result<Option<FileRef>, AttachmentError> {
        let Some(index) = self.attachment_cursor else {
            return Ok(None);
        };
        if index >= self.request.attachments.len() {
            self.attachment_cursor = None;
            return Ok(None);
        }
        let removed = self.request.attachments.remove_at(index)?;
        let len = self.request.attachments.len();
        self.attachment_cursor = if len == 0 { None } else { Some(index.min(len - 1)) };
        self.touch();
        Ok(Some(removed))
    }
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new(OptionCatalog::default())
    }
}

impl Form for IntakeForm {
    fn field_count(&self) -> usize {
        self.focusable_fields().len() + 1 // visible fields + action panel
    }
    fn active_field(&self) -> usize {
        let fields = self.focusable_fields();
        match self.focus {
            FormFocus::Field(field) => fields.iter().position(|f| *f == field).unwrap_or(0),
            FormFocus::Actions => fields.len(),
        }
    }
    fn set_active_field(&mut self, index: usize) {
        let fields = self.focusable_fields();
        self.focus = match fields.get(index) {
            Some(field) => FormFocus::Field(*field),
            None => FormFocus::Actions,
        };
        self.on_focus_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{fixtures::complete_form, ErrorKind, SelectOption};
    use pretty_assertions::assert_eq;

    fn focused(field: Field) -> IntakeForm {
        let mut form = IntakeForm::default();
        form.focus = FormFocus::Field(field);
        form
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_focuses_first_field() {
            let form = IntakeForm::default();
            assert_eq!(form.focus, FormFocus::Field(Field::RequesterName));
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_field_count_includes_action_panel() {
            let form = IntakeForm::default();
            assert_eq!(form.field_count(), form.focusable_fields().len() + 1);
        }

        #[test]
        fn test_prev_from_first_wraps_to_actions() {
            let mut form = IntakeForm::default();
            form.prev_field();
            assert!(form.is_actions_focused());
            form.next_field();
            assert_eq!(form.focus, FormFocus::Field(Field::RequesterName));
        }

        #[test]
        fn test_opening_a_group_inserts_its_fields_after_the_flag() {
            let mut form = focused(Field::IncludesDataLoad);
            let closed = form.field_count();
            form.input_char('s');
            assert_eq!(form.field_count(), closed + 3);
            form.next_field();
            assert_eq!(form.focus, FormFocus::Field(Field::DataType));
        }

        #[test]
        fn test_closed_group_is_skipped() {
            let mut form = focused(Field::SystemIntegration);
            form.input_char('n');
            form.next_field();
            assert_eq!(form.focus, FormFocus::Field(Field::Priority));
        }

        #[test]
        fn test_set_active_field_past_end_focuses_actions() {
            let mut form = IntakeForm::default();
            form.set_active_field(1000);
            assert!(form.is_actions_focused());
        }

        #[test]
        fn test_buttons_wrap() {
            let mut form = IntakeForm::default();
            assert_eq!(form.selected_action(), FormAction::Submit);
            form.prev_button();
            assert_eq!(form.selected_action(), FormAction::Reset);
            form.next_button();
            assert_eq!(form.selected_action(), FormAction::Submit);
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_into_text_field() {
            let mut form = focused(Field::Email);
            for c in "a@b.co".chars() {
                form.input_char(c);
            }
            form.backspace();
            assert_eq!(form.request.email, "a@b.c");
        }

        #[test]
        fn test_newline_only_in_multiline_fields() {
            let mut form = focused(Field::Description);
            form.input_char('x');
            form.newline();
            assert_eq!(form.request.description, "x\n");

            let mut form = focused(Field::Phone);
            form.newline();
            assert!(form.request.phone.is_empty());
        }

        #[test]
        fn test_yes_no_keys_store_booleans() {
            let mut form = focused(Field::AffectsPortal);
            form.input_char('s');
            assert_eq!(form.request.affects_portal, Some(true));
            form.input_char('n');
            assert_eq!(form.request.affects_portal, Some(false));
            assert_eq!(form.option_cursor, 1);
        }

        #[test]
        fn test_arrows_cycle_radio_choice() {
            let mut form = focused(Field::Priority);
            form.move_option(true);
            assert_eq!(form.request.priority.as_deref(), Some("Media"));
            form.move_option(false);
            form.move_option(false);
            assert_eq!(form.request.priority.as_deref(), Some("Baja"));
        }

        #[test]
        fn test_multi_select_toggles_with_space() {
            let mut form = focused(Field::DataType);
            form.move_option(true);
            assert!(form.request.data_type.is_empty());
            form.input_char(' ');
            let expected = form.catalog.data_types[1].clone();
            assert_eq!(form.request.data_type, vec![expected]);
            form.input_char(' ');
            assert!(form.request.data_type.is_empty());
        }

        #[test]
        fn test_select_follows_cursor() {
            let mut form = focused(Field::DataFrequency);
            form.move_option(true);
            let expected = form.catalog.data_frequencies[1].clone();
            assert_eq!(form.request.data_frequency, Some(expected));
        }

        #[test]
        fn test_focus_restores_option_cursor_from_value() {
            let mut form = IntakeForm::default();
            form.request.request_channel = Some("Otro".to_string());
            let index = form
                .focusable_fields()
                .iter()
                .position(|f| *f == Field::RequestChannel)
                .unwrap();
            form.set_active_field(index);
            assert_eq!(form.option_cursor, 2);
        }
    }

    mod attachments {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_pending_path_is_cleared_on_take() {
            let mut form = focused(Field::Attachments);
            for c in " /tmp/a.pdf ".chars() {
                form.input_char(c);
            }
            assert_eq!(form.take_pending_path(), Some("/tmp/a.pdf".to_string()));
            assert!(form.pending_path.is_empty());
            assert_eq!(form.take_pending_path(), None);
        }

        #[test]
        fn test_attach_dedups_by_name() {
            let mut form = IntakeForm::default();
            assert_eq!(form.attach(vec![FileRef::new("a.pdf", "/x/a.pdf")]), 1);
            assert_eq!(form.attach(vec![FileRef::new("a.pdf", "/y/a.pdf")]), 0);
            assert_eq!(form.request.attachments.len(), 1);
        }

        #[test]
        fn test_cursor_walks_list_then_releases() {
            let mut form = IntakeForm::default();
            form.attach(vec![FileRef::new("a", "/a"), FileRef::new("b", "/b")]);
            assert!(!form.move_attachment_cursor(false));
            assert!(form.move_attachment_cursor(true));
            assert!(form.move_attachment_cursor(true));
            assert_eq!(form.attachment_cursor, Some(1));
            assert!(!form.move_attachment_cursor(true));
            assert!(form.move_attachment_cursor(false));
            assert!(form.move_attachment_cursor(false));
            assert_eq!(form.attachment_cursor, None);
        }

        #[test]
        fn test_remove_selected_keeps_cursor_in_bounds() {
            let mut form = IntakeForm::default();
            form.attach(vec![FileRef::new("a", "/a"), FileRef::new("b", "/b")]);
            form.attachment_cursor = Some(1);
            let removed = form.remove_selected_attachment().unwrap();
            assert_eq!(removed.map(|f| f.name), Some("b".to_string()));
            assert_eq!(form.attachment_cursor, Some(0));
            form.remove_selected_attachment().unwrap();
            assert_eq!(form.attachment_cursor, None);
            assert!(form.request.attachments.is_empty());
        }

        #[test]
        fn test_remove_without_highlight_is_noop() {
            let mut form = IntakeForm::default();
            form.attach(vec![FileRef::new("a", "/a")]);
            assert_eq!(form.remove_selected_attachment().unwrap(), None);
            form.attachment_cursor = Some(5);
            assert_eq!(form.remove_selected_attachment().unwrap(), None);
            assert_eq!(form.request.attachments.len(), 1);
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_hidden_until_first_submit() {
            let mut form = focused(Field::Email);
            form.input_char('x');
            assert!(form.errors.is_empty());
        }

        #[test]
        fn test_show_errors_focuses_first_error_and_revalidates() {
            let mut form = IntakeForm::default();
            form.request = complete_form();
            form.request.email = "bad".to_string();
            form.show_errors(validate(&form.request));
            assert_eq!(form.focus, FormFocus::Field(Field::Email));
            assert_eq!(form.errors.kind(Field::Email), Some(ErrorKind::InvalidFormat));

            form.backspace();
            form.backspace();
            form.backspace();
            assert_eq!(form.errors.kind(Field::Email), Some(ErrorKind::Required));
            for c in "a@b.co".chars() {
                form.input_char(c);
            }
            assert!(form.errors.is_empty());
        }

        #[test]
        fn test_closing_group_drops_its_errors_in_revalidate_mode() {
            let mut form = IntakeForm::default();
            form.request = complete_form();
            form.request.includes_data_load = Some(true);
            form.show_errors(validate(&form.request));
            assert_eq!(form.errors.len(), 3);
            form.focus = FormFocus::Field(Field::IncludesDataLoad);
            form.input_char('n');
            assert!(form.errors.is_empty());
        }

        #[test]
        fn test_reset_clears_snapshot_and_errors_but_keeps_catalog() {
            let catalog = OptionCatalog::new(vec![SelectOption::new("x", "X")], vec![]);
            let mut form = IntakeForm::new(catalog.clone());
            form.request = complete_form();
            form.show_errors(validate(&RequestForm::new()));
            form.reset();
            assert_eq!(form.request, RequestForm::new());
            assert!(form.errors.is_empty());
            assert!(!form.revalidate);
            assert_eq!(form.catalog, catalog);
        }
    }
}
