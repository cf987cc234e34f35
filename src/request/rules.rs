//! Conditional validation rule table
//!
//! Each rule names a field, when it applies, and a check over the whole
//! snapshot. Conditional rules apply only while the group they belong to is
//! open, so stale values under a closed group are never reported.

use super::model::{Field, RequestForm};
use super::visibility::{visible_groups, VisibilityGroup};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").ok());

const FLAG_REQUIRED: &str = "Campo requerido";
const NOT_ALLOWED: &str = "Valor no permitido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Absent or empty where mandatory
    Required,
    /// Present but fails a shape or membership check
    InvalidFormat,
    /// Collection below its minimum size
    InvalidCount,
}

/// One field's validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}: {message}", field.name())]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
    pub message: &'static str,
}

/// Per-field errors in declaration order. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    #[cfg(test)]
    pub fn kind(&self, field: Field) -> Option<ErrorKind> {
        self.get(field).map(|e| e.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    fn insert(&mut self, error: FieldError) {
        self.0.entry(error.field).or_insert(error);
    }
}

/// When a rule is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Always,
    WhenVisible(VisibilityGroup),
}

impl Requirement {
    /// `open` is the set of visible groups for the snapshot being checked
    fn applies(self, open: &BTreeSet<VisibilityGroup>) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::WhenVisible(group) => open.contains(&group),
        }
    }
}

type Violation = (ErrorKind, &'static str);
type Check = fn(&RequestForm) -> Result<(), Violation>;

pub struct Rule {
    pub field: Field,
    pub requirement: Requirement,
    check: Check,
}

impl Rule {
    const fn always(field: Field, check: Check) -> Self {
        Self {
            field,
            requirement: Requirement::Always,
            check,
        }
    }

    const fn when(group: VisibilityGroup, field: Field, check: Check) -> Self {
        Self {
            field,
            requirement: Requirement::WhenVisible(group),
            check,
        }
    }
}

fn required_text(value: &str, message: &'static str) -> Result<(), Violation> {
    if value.is_empty() {
        Err((ErrorKind::Required, message))
    } else {
        Ok(())
    }
}

fn required_flag(value: Option<bool>) -> Result<(), Violation> {
    value.map(|_| ()).ok_or((ErrorKind::Required, FLAG_REQUIRED))
}

/// `parsed` is the typed reading of `token`; a token it cannot read is not allowed
fn one_of<T>(
    token: Option<&str>,
    parsed: Option<T>,
    message: &'static str,
) -> Result<(), Violation> {
    match (token, parsed) {
        (None | Some(""), _) => Err((ErrorKind::Required, message)),
        (_, Some(_)) => Ok(()),
        (Some(_), None) => Err((ErrorKind::InvalidFormat, NOT_ALLOWED)),
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(value))
}

fn check_email(form: &RequestForm) -> Result<(), Violation> {
    required_text(&form.email, "Correo requerido")?;
    if is_valid_email(&form.email) {
        Ok(())
    } else {
        Err((ErrorKind::InvalidFormat, "Correo inválido"))
    }
}

fn check_data_type(form: &RequestForm) -> Result<(), Violation> {
    if form.data_type.is_empty() {
        return Err((
            ErrorKind::InvalidCount,
            "Debe seleccionar al menos un tipo de dato",
        ));
    }
    if form.data_type.iter().all(|o| o.is_complete()) {
        Ok(())
    } else {
        Err((ErrorKind::InvalidFormat, "Tipo de datos inválido"))
    }
}

fn check_data_frequency(form: &RequestForm) -> Result<(), Violation> {
    match &form.data_frequency {
        Some(option) if option.is_complete() => Ok(()),
        _ => Err((ErrorKind::Required, "Periodicidad requerida")),
    }
}

fn check_attachments(form: &RequestForm) -> Result<(), Violation> {
    if form.attachments.is_empty() {
        Err((ErrorKind::InvalidCount, "Debe adjuntar al menos un archivo"))
    } else {
        Ok(())
    }
}

/// The rule table, in field declaration order
pub static RULES: &[Rule] = &[
    Rule::always(Field::RequesterName, |f| {
        required_text(&f.requester_name, "Nombre requerido")
    }),
    Rule::always(Field::Department, |f| {
        required_text(&f.department, "Departamento requerido")
    }),
    Rule::always(Field::RequestDate, |f| {
        required_text(&f.request_date, "Fecha requerida")
    }),
    Rule::always(Field::Phone, |f| {
        required_text(&f.phone, "Teléfono requerido")
    }),
    Rule::always(Field::Email, check_email),
    Rule::always(Field::RequestChannel, |f| {
        one_of(
            f.request_channel.as_deref(),
            f.request_channel(),
            "Canal requerido",
        )
    }),
    Rule::always(Field::RequestTitle, |f| {
        required_text(&f.request_title, "Título requerido")
    }),
    Rule::always(Field::DesiredDeliveryDate, |f| {
        required_text(&f.desired_delivery_date, "Fecha deseada requerida")
    }),
    Rule::always(Field::Description, |f| {
        required_text(&f.description, "Descripción requerida")
    }),
    Rule::always(Field::Objective, |f| {
        required_text(&f.objective, "Objetivo requerido")
    }),
    Rule::always(Field::DevelopmentType, |f| {
        one_of(
            f.development_type.as_deref(),
            f.development_type(),
            "Tipo requerido",
        )
    }),
    Rule::always(Field::IncludesDataLoad, |f| {
        required_flag(f.includes_data_load)
    }),
    Rule::when(VisibilityGroup::DataLoad, Field::DataType, check_data_type),
    Rule::when(VisibilityGroup::DataLoad, Field::DataSource, |f| {
        required_text(&f.data_source, "Fuente requerida")
    }),
    Rule::when(
        VisibilityGroup::DataLoad,
        Field::DataFrequency,
        check_data_frequency,
    ),
    Rule::always(Field::MetadataUpdate, |f| required_flag(f.metadata_update)),
    Rule::always(Field::SystemIntegration, |f| {
        required_flag(f.system_integration)
    }),
    Rule::when(VisibilityGroup::Integration, Field::IntegratedSystems, |f| {
        required_text(&f.integrated_systems, "Sistemas requeridos")
    }),
    Rule::always(Field::Priority, |f| {
        one_of(f.priority.as_deref(), f.priority(), "Prioridad requerida")
    }),
    Rule::always(Field::PriorityJustification, |f| {
        required_text(&f.priority_justification, "Justificación requerida")
    }),
    Rule::always(Field::AffectsPortal, |f| required_flag(f.affects_portal)),
    Rule::always(Field::RequiresDowntime, |f| {
        required_flag(f.requires_downtime)
    }),
    Rule::when(VisibilityGroup::Downtime, Field::EstimatedDowntime, |f| {
        required_text(&f.estimated_downtime, "Tiempo estimado requerido")
    }),
    Rule::always(Field::IncludesAttachments, |f| {
        required_flag(f.includes_attachments)
    }),
    Rule::when(
        VisibilityGroup::Attachments,
        Field::Attachments,
        check_attachments,
    ),
];

/// Run every applicable rule against the snapshot
pub fn validate(form: &RequestForm) -> ValidationErrors {
    let open = visible_groups(form);
    let mut errors = ValidationErrors::default();
    for rule in RULES {
        if !rule.requirement.applies(&open) {
            continue;
        }
        if let Err((kind, message)) = (rule.check)(form) {
            errors.insert(FieldError {
                field: rule.field,
                kind,
                message,
            });
        }
    }
    errors
}

/// Rule governing a field, if any
pub fn rule_for(field: Field) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.field == field)
}

/// Whether the field must be filled in for the current snapshot
pub fn is_required(form: &RequestForm, field: Field) -> bool {
    rule_for(field).is_some_and(|r| r.requirement.applies(&visible_groups(form)))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::request::model::SelectOption;

    /// Every always-required field filled, every flag `false`
    pub fn complete_form() -> RequestForm {
        RequestForm {
            requester_name: "Ana Pérez".to_string(),
            department: "Estadística".to_string(),
            request_date: "2026-10-18".to_string(),
            phone: "+56 9 1234 5678".to_string(),
            email: "ana@example.org".to_string(),
            request_channel: Some("Correo".to_string()),
            request_title: "Nuevo dataset de transporte".to_string(),
            desired_delivery_date: "2026-12-01".to_string(),
            description: "Publicar los viajes diarios".to_string(),
            objective: "Datos abiertos de movilidad".to_string(),
            development_type: Some("Nuevo desarrollo".to_string()),
            includes_data_load: Some(false),
            metadata_update: Some(false),
            system_integration: Some(false),
            priority: Some("Media".to_string()),
            priority_justification: "Compromiso institucional".to_string(),
            affects_portal: Some(false),
            requires_downtime: Some(false),
            includes_attachments: Some(false),
            ..RequestForm::default()
        }
    }

    pub fn option(value: &str) -> SelectOption {
        SelectOption::new(value, &value.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{complete_form, option};
    use super::*;
    use crate::request::attachments::FileRef;
    use crate::request::model::SelectOption;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rules_follow_declaration_order() {
        let fields: Vec<Field> = RULES.iter().map(|r| r.field).collect();
        let mut sorted = fields.clone();
        sorted.sort();
        assert_eq!(fields, sorted);
    }

    #[test]
    fn test_optional_fields_have_no_rule() {
        assert!(rule_for(Field::AdditionalNotes).is_none());
        assert!(rule_for(Field::CopyEmails).is_none());
    }

    mod scenarios {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_form_with_all_flags_false_is_valid() {
            let errors = validate(&complete_form());
            assert_eq!(errors, ValidationErrors::default());
        }

        #[test]
        fn test_downtime_without_estimate() {
            let mut form = complete_form();
            form.requires_downtime = Some(true);
            let errors = validate(&form);
            assert_eq!(errors.fields(), vec![Field::EstimatedDowntime]);
            assert_eq!(errors.kind(Field::EstimatedDowntime), Some(ErrorKind::Required));
        }

        #[test]
        fn test_bad_email_reported_independently() {
            let mut form = RequestForm::new();
            form.email = "not-an-email".to_string();
            let errors = validate(&form);
            let email = errors.get(Field::Email).unwrap();
            assert_eq!(email.kind, ErrorKind::InvalidFormat);
            assert_eq!(email.message, "Correo inválido");

            let mut valid = complete_form();
            valid.email = "not-an-email".to_string();
            assert_eq!(validate(&valid).fields(), vec![Field::Email]);
        }

        #[test]
        fn test_empty_form_reports_every_always_required_field() {
            let errors = validate(&RequestForm::new());
            let expected: Vec<Field> = RULES
                .iter()
                .filter(|r| r.requirement == Requirement::Always)
                .map(|r| r.field)
                .collect();
            assert_eq!(errors.fields(), expected);
            assert_eq!(errors.kind(Field::Email), Some(ErrorKind::Required));
        }

        #[test]
        fn test_revalidation_is_deterministic() {
            let form = complete_form();
            assert_eq!(validate(&form), validate(&form));
            assert!(validate(&form).is_empty());
        }
    }

    mod data_load {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_flag_false_ignores_dependent_content() {
            let mut form = complete_form();
            form.data_type = vec![SelectOption::new("", "")];
            form.data_frequency = Some(SelectOption::new("", "x"));
            form.data_source.clear();
            assert!(validate(&form).is_empty());
        }

        #[test]
        fn test_flag_true_with_empty_data_type_reports_count_once() {
            let mut form = complete_form();
            form.includes_data_load = Some(true);
            form.data_source = "SIG municipal".to_string();
            form.data_frequency = Some(option("mensual"));
            let errors = validate(&form);
            assert_eq!(errors.fields(), vec![Field::DataType]);
            assert_eq!(errors.kind(Field::DataType), Some(ErrorKind::InvalidCount));
        }

        #[test]
        fn test_flag_true_requires_all_three() {
            let mut form = complete_form();
            form.includes_data_load = Some(true);
            let errors = validate(&form);
            assert_eq!(
                errors.fields(),
                vec![Field::DataType, Field::DataSource, Field::DataFrequency]
            );
        }

        #[test]
        fn test_incomplete_data_type_entry_is_invalid_format() {
            let mut form = complete_form();
            form.includes_data_load = Some(true);
            form.data_type = vec![option("tabular"), SelectOption::new("api", "")];
            form.data_source = "API".to_string();
            form.data_frequency = Some(option("diaria"));
            assert_eq!(validate(&form).kind(Field::DataType), Some(ErrorKind::InvalidFormat));
        }

        #[test]
        fn test_frequency_needs_value_and_label() {
            let mut form = complete_form();
            form.includes_data_load = Some(true);
            form.data_type = vec![option("tabular")];
            form.data_source = "API".to_string();
            form.data_frequency = Some(SelectOption::new("diaria", ""));
            let errors = validate(&form);
            assert_eq!(errors.fields(), vec![Field::DataFrequency]);
            assert_eq!(errors.get(Field::DataFrequency).unwrap().message, "Periodicidad requerida");
        }

        #[test]
        fn test_flipping_flag_back_clears_errors_without_clearing_data() {
            let mut form = complete_form();
            form.includes_data_load = Some(true);
            form.data_source = "stale".to_string();
            assert!(!validate(&form).is_empty());
            form.includes_data_load = Some(false);
            assert!(validate(&form).is_empty());
            assert_eq!(form.data_source, "stale");
        }
    }

    mod closed_sets {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_out_of_set_token_is_invalid_format() {
            let mut form = complete_form();
            form.request_channel = Some("correo".to_string());
            form.priority = Some("Urgente".to_string());
            let errors = validate(&form);
            assert_eq!(errors.fields(), vec![Field::RequestChannel, Field::Priority]);
            assert_eq!(errors.kind(Field::RequestChannel), Some(ErrorKind::InvalidFormat));
        }

        #[test]
        fn test_empty_token_is_required() {
            let mut form = complete_form();
            form.development_type = Some(String::new());
            assert_eq!(
                validate(&form).kind(Field::DevelopmentType),
                Some(ErrorKind::Required)
            );
        }
    }

    mod conditional {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_integration_requires_systems() {
            let mut form = complete_form();
            form.system_integration = Some(true);
            assert_eq!(validate(&form).fields(), vec![Field::IntegratedSystems]);
            form.integrated_systems = "ERP".to_string();
            assert!(validate(&form).is_empty());
        }

        #[test]
        fn test_attachments_require_one_file() {
            let mut form = complete_form();
            form.includes_attachments = Some(true);
            assert_eq!(
                validate(&form).kind(Field::Attachments),
                Some(ErrorKind::InvalidCount)
            );
            form.attachments.add([FileRef::new("a.pdf", "/tmp/a.pdf")]);
            assert!(validate(&form).is_empty());
        }

        #[test]
        fn test_is_required_tracks_flags() {
            let mut form = complete_form();
            assert!(is_required(&form, Field::Email));
            assert!(!is_required(&form, Field::EstimatedDowntime));
            form.requires_downtime = Some(true);
            assert!(is_required(&form, Field::EstimatedDowntime));
            assert!(!is_required(&form, Field::AdditionalNotes));
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("ana.perez+tag@datos.gob.cl"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@.co"));
    }

    #[test]
    fn test_field_error_display() {
        let errors = validate(&RequestForm::new());
        let first = errors.iter().next().unwrap();
        assert_eq!(first.to_string(), "requesterName: Nombre requerido");
    }
}
