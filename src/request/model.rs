//! Request snapshot and field catalogue

use super::attachments::AttachmentSet;
use serde::{Deserialize, Serialize};

/// Every field of the request, in declaration order.
///
/// The derived `Ord` follows declaration order, so ordered collections keyed
/// by `Field` iterate the way the form is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    RequesterName,
    Department,
    RequestDate,
    Phone,
    Email,
    RequestChannel,
    RequestTitle,
    DesiredDeliveryDate,
    Description,
    Objective,
    DevelopmentType,
    IncludesDataLoad,
    DataType,
    DataSource,
    DataFrequency,
    MetadataUpdate,
    SystemIntegration,
    IntegratedSystems,
    Priority,
    PriorityJustification,
    AffectsPortal,
    RequiresDowntime,
    EstimatedDowntime,
    IncludesAttachments,
    Attachments,
    AdditionalNotes,
    CopyEmails,
}

impl Field {
    pub const ALL: [Field; 27] = [
        Field::RequesterName,
        Field::Department,
        Field::RequestDate,
        Field::Phone,
        Field::Email,
        Field::RequestChannel,
        Field::RequestTitle,
        Field::DesiredDeliveryDate,
        Field::Description,
        Field::Objective,
        Field::DevelopmentType,
        Field::IncludesDataLoad,
        Field::DataType,
        Field::DataSource,
        Field::DataFrequency,
        Field::MetadataUpdate,
        Field::SystemIntegration,
        Field::IntegratedSystems,
        Field::Priority,
        Field::PriorityJustification,
        Field::AffectsPortal,
        Field::RequiresDowntime,
        Field::EstimatedDowntime,
        Field::IncludesAttachments,
        Field::Attachments,
        Field::AdditionalNotes,
        Field::CopyEmails,
    ];

    /// Key used in the serialized snapshot
    pub fn name(self) -> &'static str {
        match self {
            Field::RequesterName => "requesterName",
            Field::Department => "department",
            Field::RequestDate => "requestDate",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::RequestChannel => "requestChannel",
            Field::RequestTitle => "requestTitle",
            Field::DesiredDeliveryDate => "desiredDeliveryDate",
            Field::Description => "description",
            Field::Objective => "objective",
            Field::DevelopmentType => "developmentType",
            Field::IncludesDataLoad => "includesDataLoad",
            Field::DataType => "dataType",
            Field::DataSource => "dataSource",
            Field::DataFrequency => "dataFrequency",
            Field::MetadataUpdate => "metadataUpdate",
            Field::SystemIntegration => "systemIntegration",
            Field::IntegratedSystems => "integratedSystems",
            Field::Priority => "priority",
            Field::PriorityJustification => "priorityJustification",
            Field::AffectsPortal => "affectsPortal",
            Field::RequiresDowntime => "requiresDowntime",
            Field::EstimatedDowntime => "estimatedDowntime",
            Field::IncludesAttachments => "includesAttachments",
            Field::Attachments => "attachments",
            Field::AdditionalNotes => "additionalNotes",
            Field::CopyEmails => "copyEmails",
        }
    }
}

/// A closed set of string tokens backing a radio field
pub trait ClosedSet: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn token(self) -> &'static str;

    /// Exact, case-sensitive lookup
    fn parse(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.token() == token)
    }

    /// Every token in the set, in display order
    fn tokens() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.token()).collect()
    }
}

/// Channel through which the request arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestChannel {
    Correo,
    Whatsapp,
    Otro,
}

impl ClosedSet for RequestChannel {
    const ALL: &'static [Self] = &[Self::Correo, Self::Whatsapp, Self::Otro];

    fn token(self) -> &'static str {
        match self {
            Self::Correo => "Correo",
            Self::Whatsapp => "Whatsapp",
            Self::Otro => "Otro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevelopmentType {
    NewDevelopment,
    Modification,
}

impl ClosedSet for DevelopmentType {
    const ALL: &'static [Self] = &[Self::NewDevelopment, Self::Modification];

    fn token(self) -> &'static str {
        match self {
            Self::NewDevelopment => "Nuevo desarrollo",
            Self::Modification => "Modificación",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl ClosedSet for Priority {
    const ALL: &'static [Self] = &[Self::High, Self::Medium, Self::Low];

    fn token(self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Media",
            Self::Low => "Baja",
        }
    }
}

/// A (value, label) pair from the option catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// Both halves are present
    pub fn is_complete(&self) -> bool {
        !self.value.is_empty() && !self.label.is_empty()
    }
}

/// The complete snapshot of one request form.
///
/// Text fields use the empty string for "absent", flags and radio choices use
/// `None`. Radio choices keep the raw token so out-of-set input can be
/// reported by the validator instead of failing to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestForm {
    pub requester_name: String,
    pub department: String,
    pub request_date: String,
    pub phone: String,
    pub email: String,
    pub request_channel: Option<String>,

    pub request_title: String,
    pub desired_delivery_date: String,
    pub description: String,
    pub objective: String,

    pub development_type: Option<String>,
    pub includes_data_load: Option<bool>,
    pub data_type: Vec<SelectOption>,
    pub data_source: String,
    pub data_frequency: Option<SelectOption>,
    pub metadata_update: Option<bool>,
    pub system_integration: Option<bool>,
    pub integrated_systems: String,

    pub priority: Option<String>,
    pub priority_justification: String,
    pub affects_portal: Option<bool>,
    pub requires_downtime: Option<bool>,
    pub estimated_downtime: String,

    pub includes_attachments: Option<bool>,
    pub attachments: AttachmentSet,

    pub additional_notes: String,
    pub copy_emails: String,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a free-text field, `None` for non-text fields
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::RequesterName => &self.requester_name,
            Field::Department => &self.department,
            Field::RequestDate => &self.request_date,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::RequestTitle => &self.request_title,
            Field::DesiredDeliveryDate => &self.desired_delivery_date,
            Field::Description => &self.description,
            Field::Objective => &self.objective,
            Field::DataSource => &self.data_source,
            Field::IntegratedSystems => &self.integrated_systems,
            Field::PriorityJustification => &self.priority_justification,
            Field::EstimatedDowntime => &self.estimated_downtime,
            Field::AdditionalNotes => &self.additional_notes,
            Field::CopyEmails => &self.copy_emails,
            _ => return None,
        };
        Some(value)
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let value = match field {
            Field::RequesterName => &mut self.requester_name,
            Field::Department => &mut self.department,
            Field::RequestDate => &mut self.request_date,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::RequestTitle => &mut self.request_title,
            Field::DesiredDeliveryDate => &mut self.desired_delivery_date,
            Field::Description => &mut self.description,
            Field::Objective => &mut self.objective,
            Field::DataSource => &mut self.data_source,
            Field::IntegratedSystems => &mut self.integrated_systems,
            Field::PriorityJustification => &mut self.priority_justification,
            Field::EstimatedDowntime => &mut self.estimated_downtime,
            Field::AdditionalNotes => &mut self.additional_notes,
            Field::CopyEmails => &mut self.copy_emails,
            _ => return None,
        };
        Some(value)
    }

    /// Value of a yes/no field. Outer `None` means the field is not a flag.
    pub fn flag(&self, field: Field) -> Option<Option<bool>> {
        match field {
            Field::IncludesDataLoad => Some(self.includes_data_load),
            Field::MetadataUpdate => Some(self.metadata_update),
            Field::SystemIntegration => Some(self.system_integration),
            Field::AffectsPortal => Some(self.affects_portal),
            Field::RequiresDowntime => Some(self.requires_downtime),
            Field::IncludesAttachments => Some(self.includes_attachments),
            _ => None,
        }
    }

    /// True only when the flag is set and `true`
    pub fn is_set(&self, field: Field) -> bool {
        self.flag(field).flatten().unwrap_or(false)
    }

    /// Returns false when `field` is not a flag
    pub fn set_flag(&mut self, field: Field, value: bool) -> bool {
        let slot = match field {
            Field::IncludesDataLoad => &mut self.includes_data_load,
            Field::MetadataUpdate => &mut self.metadata_update,
            Field::SystemIntegration => &mut self.system_integration,
            Field::AffectsPortal => &mut self.affects_portal,
            Field::RequiresDowntime => &mut self.requires_downtime,
            Field::IncludesAttachments => &mut self.includes_attachments,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Raw token of a radio field. Outer `None` means the field is not a radio.
    pub fn choice(&self, field: Field) -> Option<Option<&str>> {
        match field {
            Field::RequestChannel => Some(self.request_channel.as_deref()),
            Field::DevelopmentType => Some(self.development_type.as_deref()),
            Field::Priority => Some(self.priority.as_deref()),
            _ => None,
        }
    }

    /// Returns false when `field` is not a radio
    pub fn set_choice(&mut self, field: Field, token: &str) -> bool {
        let slot = match field {
            Field::RequestChannel => &mut self.request_channel,
            Field::DevelopmentType => &mut self.development_type,
            Field::Priority => &mut self.priority,
            _ => return false,
        };
        *slot = Some(token.to_string());
        true
    }

    /// Tokens offered for a radio field
    pub fn choice_tokens(field: Field) -> Vec<&'static str> {
        match field {
            Field::RequestChannel => RequestChannel::tokens(),
            Field::DevelopmentType => DevelopmentType::tokens(),
            Field::Priority => Priority::tokens(),
            _ => Vec::new(),
        }
    }

    pub fn request_channel(&self) -> Option<RequestChannel> {
        self.request_channel.as_deref().and_then(RequestChannel::parse)
    }

    pub fn development_type(&self) -> Option<DevelopmentType> {
        self.development_type
            .as_deref()
            .and_then(DevelopmentType::parse)
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority.as_deref().and_then(Priority::parse)
    }

    /// Toggle an option in the multi-select data type list
    pub fn toggle_data_type(&mut self, option: &SelectOption) {
        if let Some(pos) = self.data_type.iter().position(|o| o.value == option.value) {
            self.data_type.remove(pos);
        } else {
            self.data_type.push(option.clone());
        }
    }
}
