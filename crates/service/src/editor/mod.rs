//! Form editors.
//!
//! Both editors share one lifecycle: `load` (edit mode fetch, or stay blank),
//! field-by-field edits, then `submit` which validates, serializes, calls
//! create or update, and reconciles the response onto the form.

mod form_state;
mod service_editor;
mod testimonial_editor;

pub use form_state::{FieldErrors, LoadingFlag, LoadingGuard, SelectOption, SubmitLabel, SubmitOutcome};
pub use service_editor::{ServiceEditor, ServiceField, ServiceToggle};
pub use testimonial_editor::{TestimonialEditor, TestimonialField};
