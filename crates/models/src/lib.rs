//! Records and wire types shared by the admin editors and the HTTP client.

pub mod de;
pub mod errors;
pub mod form;
pub mod rating;
pub mod responses;
pub mod service;
pub mod testimonial;

pub use form::ServiceForm;
pub use rating::Rating;
pub use responses::{MissingField, ServiceEnvelope, ServiceList, ServiceSummary, SubmitResponse};
pub use service::{DeliveryInfo, Faq, ServiceRecord, VideoInfo};
pub use testimonial::{TestimonialPayload, TestimonialRecord};
