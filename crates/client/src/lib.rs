//! HTTP implementation of the editor API seams over `reqwest`.
//!
//! Paths are relative to `api.base_url`:
//! - `GET  /services/{id}`, `POST /services`, `PUT /services/{id}` (multipart)
//! - `GET  /services/published`
//! - `GET  /testimonials/{id}`, `POST /testimonials`, `PUT /testimonials/{id}` (JSON)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use models::{ServiceEnvelope, ServiceForm, ServiceList, SubmitResponse, TestimonialPayload, TestimonialRecord};
use reqwest::{multipart, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use service::api::{ServiceApi, ServiceCatalog, TestimonialApi};
use service::editor::{ServiceEditor, TestimonialEditor};
use service::ui::{Navigator, Notifier};
use service::ApiError;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot build http client: {0}")]
    Build(String),
}

/// CMS API over HTTP. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAdminApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!("base url must be http(s): {base_url:?}")));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(cfg: &configs::ApiConfig) -> Result<Self, ClientError> {
        Self::new(&cfg.base_url, Duration::from_secs(cfg.timeout_secs))
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), len = bytes.len(), "api response");
        Ok((status, bytes.to_vec()))
    }

    /// A submit envelope. A body without `status` takes the HTTP status.
    async fn submit(&self, request: RequestBuilder) -> Result<SubmitResponse, ApiError> {
        let (status, bytes) = self.send(request).await?;
        let body = json_body(status, &bytes)?;
        let mut response = match body {
            Value::Object(_) => decode::<SubmitResponse>(body)?,
            _ => SubmitResponse::default(),
        };
        if response.status == 0 {
            response.status = status.as_u16();
        }
        Ok(response)
    }
}

/// Build both editors from one configuration, sharing a single HTTP client.
pub struct EditorFactory {
    api: Arc<HttpAdminApi>,
    routes: configs::RoutesConfig,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl EditorFactory {
    pub fn new(
        cfg: &configs::AdminConfig,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let api = Arc::new(HttpAdminApi::from_config(&cfg.api)?);
        Ok(Self { api, routes: cfg.routes.clone(), notifier, navigator })
    }

    pub fn service_editor(&self, id: Option<String>) -> ServiceEditor<HttpAdminApi> {
        ServiceEditor::new(self.api.clone(), self.notifier.clone(), self.navigator.clone(), id)
            .with_list_route(self.routes.services.clone())
    }

    pub fn testimonial_editor(&self, id: Option<String>) -> TestimonialEditor<HttpAdminApi> {
        TestimonialEditor::new(self.api.clone(), self.notifier.clone(), self.navigator.clone(), id)
            .with_list_route(self.routes.testimonials.clone())
    }
}

/// Parse a response body. An empty body reads as `null`. A body that is not
/// JSON is a decode error on success and a status error otherwise.
fn json_body(status: StatusCode, bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| {
        if status.is_success() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Status(status.as_u16())
        }
    })
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn multipart_form(form: &ServiceForm) -> multipart::Form {
    form.iter()
        .fold(multipart::Form::new(), |acc, (key, value)| acc.text(key.to_string(), value.to_string()))
}

#[async_trait]
impl ServiceApi for HttpAdminApi {
    #[instrument(skip(self))]
    async fn fetch_service_by_id(&self, id: &str) -> Result<ServiceEnvelope, ApiError> {
        let (status, bytes) = self.send(self.http.get(self.url(&format!("/services/{id}")))).await?;
        let body = json_body(status, &bytes)?;
        if body.is_null() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let mut envelope: ServiceEnvelope = decode(body)?;
        if envelope.status == 0 {
            envelope.status = status.as_u16();
        }
        Ok(envelope)
    }

    #[instrument(skip(self, form))]
    async fn create_service(&self, form: &ServiceForm) -> Result<SubmitResponse, ApiError> {
        self.submit(self.http.post(self.url("/services")).multipart(multipart_form(form))).await
    }

    #[instrument(skip(self, form))]
    async fn update_service(&self, id: &str, form: &ServiceForm) -> Result<SubmitResponse, ApiError> {
        self.submit(self.http.put(self.url(&format!("/services/{id}"))).multipart(multipart_form(form))).await
    }
}

#[async_trait]
impl ServiceCatalog for HttpAdminApi {
    #[instrument(skip(self))]
    async fn fetch_published_services(&self) -> Result<ServiceList, ApiError> {
        let (status, bytes) = self.send(self.http.get(self.url("/services/published"))).await?;
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        decode(json_body(status, &bytes)?)
    }
}

#[async_trait]
impl TestimonialApi for HttpAdminApi {
    #[instrument(skip(self))]
    async fn fetch_testimonial_by_id(&self, id: &str) -> Result<Option<TestimonialRecord>, ApiError> {
        let (status, bytes) = self.send(self.http.get(self.url(&format!("/testimonials/{id}")))).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        // Accept both a bare record and `{ "testimonial": {...} }`.
        let record = match json_body(status, &bytes)? {
            Value::Object(mut map) if map.contains_key("testimonial") => map.remove("testimonial").unwrap_or(Value::Null),
            other => other,
        };
        if record.is_null() {
            return Ok(None);
        }
        decode(record).map(Some)
    }

    #[instrument(skip(self, payload))]
    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<SubmitResponse, ApiError> {
        self.submit(self.http.post(self.url("/testimonials")).json(payload)).await
    }

    #[instrument(skip(self, payload))]
    async fn update_testimonial(&self, id: &str, payload: &TestimonialPayload) -> Result<SubmitResponse, ApiError> {
        self.submit(self.http.put(self.url(&format!("/testimonials/{id}"))).json(payload)).await
    }
}
