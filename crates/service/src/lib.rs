//! Headless editors for the CMS admin panel.
//! - `editor` owns form state, validation and submission reconciliation.
//! - `api` and `ui` define the collaborator seams the editors drive.
//! - In-memory doubles for every seam live next to the trait (`mock`).

pub mod api;
pub mod editor;
pub mod errors;
pub mod ui;

pub use editor::{ServiceEditor, SubmitOutcome, TestimonialEditor};
pub use errors::ApiError;
