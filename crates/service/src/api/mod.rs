//! API seams consumed by the editors.
//!
//! `client::HttpAdminApi` implements all three over HTTP; `mock` provides
//! scripted in-memory implementations.

use async_trait::async_trait;
use models::{ServiceEnvelope, ServiceForm, ServiceList, SubmitResponse, TestimonialPayload, TestimonialRecord};

use crate::errors::ApiError;

pub mod mock;

#[async_trait]
pub trait ServiceApi: Send + Sync {
    async fn fetch_service_by_id(&self, id: &str) -> Result<ServiceEnvelope, ApiError>;
    async fn create_service(&self, form: &ServiceForm) -> Result<SubmitResponse, ApiError>;
    async fn update_service(&self, id: &str, form: &ServiceForm) -> Result<SubmitResponse, ApiError>;
}

/// Source of the service titles offered by the testimonial form.
#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn fetch_published_services(&self) -> Result<ServiceList, ApiError>;
}

#[async_trait]
pub trait TestimonialApi: Send + Sync {
    /// `Ok(None)` when the API has no such testimonial.
    async fn fetch_testimonial_by_id(&self, id: &str) -> Result<Option<TestimonialRecord>, ApiError>;
    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<SubmitResponse, ApiError>;
    async fn update_testimonial(&self, id: &str, payload: &TestimonialPayload) -> Result<SubmitResponse, ApiError>;
}
