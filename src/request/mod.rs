//! Request domain: snapshot, rules, visibility, attachments and submission

mod attachments;
mod model;
mod options;
mod rules;
mod submission;
mod visibility;

pub use attachments::{AttachmentError, FileRef};
pub use model::{Field, RequestForm, SelectOption};
pub use options::OptionCatalog;
pub use rules::{is_required, validate, ValidationErrors};
pub use submission::{assemble, Submission};
pub use visibility::{visible_fields, VisibilityGroup};

#[cfg(test)]
pub(crate) use rules::{fixtures, ErrorKind};
