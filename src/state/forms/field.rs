//! Form field descriptors: label, widget kind and section for every request field

use crate::request::{Field, RequestForm, VisibilityGroup};

/// Numbered blocks the form is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    General,
    Description,
    Scope,
    Impact,
    Attachments,
    Notes,
}

impl Section {
    pub fn title(self) -> Option<&'static str> {
        match self {
            Section::General => Some("1. Información General del Requerimiento"),
            Section::Description => Some("2. Descripción del Requerimiento"),
            Section::Scope => Some("3. Alcance del Requerimiento"),
            Section::Impact => Some("4. Impacto del Cambio"),
            Section::Attachments => Some("5. Documentación Adjunta"),
            Section::Notes => None,
        }
    }
}

/// Widget used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    /// Radio group over a closed set of tokens
    Choice,
    /// Sí / No radio backed by a boolean
    YesNo,
    MultiSelect,
    Select,
    Files,
}

impl FieldKind {
    /// Kinds whose value is picked from a list of options
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldKind::Choice | FieldKind::YesNo | FieldKind::MultiSelect | FieldKind::Select
        )
    }
}

/// Labels of the Sí / No radio, in option order
pub const YES_NO_LABELS: [&str; 2] = ["Sí", "No"];

/// Static description of a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
    pub section: Section,
    pub placeholder: Option<&'static str>,
}

impl FormField {
    const fn new(field: Field, label: &'static str, kind: FieldKind, section: Section) -> Self {
        Self {
            field,
            label,
            kind,
            section,
            placeholder: None,
        }
    }

    const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Descriptor for a request field
    pub fn for_field(field: Field) -> Self {
        use FieldKind::*;
        use Section::*;
        match field {
            Field::RequesterName => Self::new(field, "Nombre del solicitante", Text, General),
            Field::Department => Self::new(field, "Cargo o departamento", Text, General),
            Field::RequestDate => Self::new(field, "Fecha de solicitud", Text, General)
                .with_placeholder("AAAA-MM-DD"),
            Field::Phone => Self::new(field, "Teléfono o contacto", Text, General),
            Field::Email => Self::new(field, "Correo electrónico", Text, General),
            Field::RequestChannel => Self::new(field, "Canal de solicitud", Choice, General),
            Field::RequestTitle => {
                Self::new(field, "Título del requerimiento", Text, Description)
            }
            Field::DesiredDeliveryDate => {
                Self::new(field, "Fecha deseada para la entrega", Text, Description)
                    .with_placeholder("AAAA-MM-DD")
            }
            Field::Description => {
                Self::new(field, "Descripción detallada", Multiline, Description)
                    .with_placeholder("Explicar el problema o la necesidad que se desea abordar")
            }
            Field::Objective => {
                Self::new(field, "Objetivo del cambio o mejora", Multiline, Description)
                    .with_placeholder("¿Cuál es el resultado esperado?")
            }
            Field::DevelopmentType => Self::new(
                field,
                "¿Es un nuevo desarrollo o una modificación?",
                Choice,
                Scope,
            ),
            Field::IncludesDataLoad => {
                Self::new(field, "¿Involucra la carga de nuevos datos?", YesNo, Scope)
            }
            Field::DataType => Self::new(field, "Tipo de datos", MultiSelect, Scope),
            Field::DataSource => Self::new(field, "Fuente de los datos", Text, Scope),
            Field::DataFrequency => Self::new(field, "Periodicidad de la carga", Select, Scope),
            Field::MetadataUpdate => {
                Self::new(field, "¿Requiere actualización de metadatos?", YesNo, Scope)
            }
            Field::SystemIntegration => Self::new(
                field,
                "¿Involucra integración con otros sistemas?",
                YesNo,
                Scope,
            ),
            Field::IntegratedSystems => {
                Self::new(field, "Especificar los sistemas", Text, Scope)
            }
            Field::Priority => Self::new(field, "Nivel de prioridad", Choice, Impact),
            Field::PriorityJustification => {
                Self::new(field, "Justificación de la prioridad", Multiline, Impact)
            }
            Field::AffectsPortal => {
                Self::new(field, "¿Afecta la disponibilidad del portal?", YesNo, Impact)
            }
            Field::RequiresDowntime => {
                Self::new(field, "¿Requiere interrupción del servicio?", YesNo, Impact)
            }
            Field::EstimatedDowntime => Self::new(field, "Tiempo estimado", Text, Impact),
            Field::IncludesAttachments => {
                Self::new(field, "¿Incluye archivos adjuntos?", YesNo, Attachments)
            }
            Field::Attachments => {
                Self::new(field, "Especificar los archivos", Files, Attachments)
                    .with_placeholder("Ruta del archivo + Enter")
            }
            Field::AdditionalNotes => Self::new(field, "Notas adicionales", Multiline, Notes),
            Field::CopyEmails => Self::new(field, "Correos electrónicos a copiar", Text, Notes),
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.kind == FieldKind::Multiline
    }

    /// Fields shown under a controlling flag are drawn indented
    pub fn is_nested(&self) -> bool {
        VisibilityGroup::of(self.field).is_some()
    }

    /// Option labels for radio-like fields (`Choice`, `YesNo`)
    pub fn radio_labels(&self) -> Vec<&'static str> {
        match self.kind {
            FieldKind::Choice => RequestForm::choice_tokens(self.field),
            FieldKind::YesNo => YES_NO_LABELS.to_vec(),
            _ => Vec::new(),
        }
    }

    /// Get the display value for text-like rendering
    pub fn display_value(&self, form: &RequestForm) -> String {
        match self.kind {
            FieldKind::Text | FieldKind::Multiline => {
                form.text(self.field).unwrap_or_default().to_string()
            }
            FieldKind::Choice => form
                .choice(self.field)
                .flatten()
                .unwrap_or_default()
                .to_string(),
            FieldKind::YesNo => match form.flag(self.field).flatten() {
                Some(true) => YES_NO_LABELS[0].to_string(),
                Some(false) => YES_NO_LABELS[1].to_string(),
                None => String::new(),
            },
            FieldKind::MultiSelect => form
                .data_type
                .iter()
                .map(|o| o.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            FieldKind::Select => form
                .data_frequency
                .as_ref()
                .map(|o| o.label.clone())
                .unwrap_or_default(),
            FieldKind::Files => form
                .attachments
                .files()
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FileRef, SelectOption};

    #[test]
    fn test_every_field_has_a_label() {
        for field in Field::ALL {
            let descriptor = FormField::for_field(field);
            assert_eq!(descriptor.field, field);
            assert!(!descriptor.label.is_empty());
        }
    }

    #[test]
    fn test_sections_are_in_field_order() {
        let sections: Vec<Section> = Field::ALL
            .iter()
            .map(|f| FormField::for_field(*f).section)
            .collect();
        let mut sorted = sections.clone();
        sorted.sort();
        assert_eq!(sections, sorted);
    }

    #[test]
    fn test_flags_use_yes_no_widget() {
        let form = RequestForm::new();
        for field in Field::ALL {
            let is_flag = form.flag(field).is_some();
            assert_eq!(FormField::for_field(field).kind == FieldKind::YesNo, is_flag);
        }
    }

    #[test]
    fn test_nested_fields_are_group_members() {
        assert!(FormField::for_field(Field::DataSource).is_nested());
        assert!(FormField::for_field(Field::Attachments).is_nested());
        assert!(!FormField::for_field(Field::IncludesDataLoad).is_nested());
    }

    #[test]
    fn test_radio_labels() {
        let channel = FormField::for_field(Field::RequestChannel);
        assert_eq!(channel.radio_labels(), vec!["Correo", "Whatsapp", "Otro"]);
        let flag = FormField::for_field(Field::AffectsPortal);
        assert_eq!(flag.radio_labels(), vec!["Sí", "No"]);
        assert!(FormField::for_field(Field::Email).radio_labels().is_empty());
    }

    #[test]
    fn test_display_values() {
        let mut form = RequestForm::new();
        form.requester_name = "Ana".to_string();
        form.affects_portal = Some(false);
        form.data_type = vec![SelectOption::new("a", "A"), SelectOption::new("b", "B")];
        form.attachments.add([FileRef::new("x.pdf", "/x.pdf")]);

        assert_eq!(FormField::for_field(Field::RequesterName).display_value(&form), "Ana");
        assert_eq!(FormField::for_field(Field::AffectsPortal).display_value(&form), "No");
        assert_eq!(FormField::for_field(Field::RequiresDowntime).display_value(&form), "");
        assert_eq!(FormField::for_field(Field::DataType).display_value(&form), "A, B");
        assert_eq!(FormField::for_field(Field::Attachments).display_value(&form), "x.pdf");
    }
}
