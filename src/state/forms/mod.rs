//! Form domain layer
//!
//! Field descriptors and the editable intake form built on the request snapshot.

mod field;
mod form_state;

pub use field::{FieldKind, FormField, Section};
pub use form_state::{Form, FormAction, FormFocus, IntakeForm};
