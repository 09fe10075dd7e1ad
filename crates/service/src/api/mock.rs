//! Simple in-memory mock APIs for tests and doc examples.
//!
//! Records fetches are answered from a map; submissions pop scripted results
//! from a queue and fall back to a 201/200 success when the queue is empty.
//! Every call is recorded so tests can assert on what was sent.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use models::{
    ServiceEnvelope, ServiceForm, ServiceList, ServiceRecord, ServiceSummary, SubmitResponse,
    TestimonialPayload, TestimonialRecord,
};

use super::{ServiceApi, ServiceCatalog, TestimonialApi};
use crate::editor::LoadingFlag;
use crate::errors::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    Fetch(String),
    Create(ServiceForm),
    Update(String, ServiceForm),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TestimonialCall {
    ListServices,
    Fetch(String),
    Create(TestimonialPayload),
    Update(String, TestimonialPayload),
}

/// Watches a loading flag and records its value whenever a submission lands.
#[derive(Default)]
struct LoadingProbe {
    flag: Mutex<Option<LoadingFlag>>,
    seen: Mutex<Vec<bool>>,
}

impl LoadingProbe {
    fn watch(&self, flag: LoadingFlag) {
        *self.flag.lock().unwrap() = Some(flag);
    }

    fn sample(&self) {
        if let Some(flag) = self.flag.lock().unwrap().as_ref() {
            self.seen.lock().unwrap().push(flag.is_loading());
        }
    }

    fn seen(&self) -> Vec<bool> {
        self.seen.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockServiceApi {
    records: Mutex<HashMap<String, ServiceEnvelope>>,
    fetch_error: Mutex<Option<ApiError>>,
    submissions: Mutex<VecDeque<Result<SubmitResponse, ApiError>>>,
    calls: Mutex<Vec<ServiceCall>>,
    probe: LoadingProbe,
}

impl MockServiceApi {
    pub fn with_record(self, id: &str, record: ServiceRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(id.to_string(), ServiceEnvelope { status: 200, service: Some(record) });
        self
    }

    pub fn with_envelope(self, id: &str, envelope: ServiceEnvelope) -> Self {
        self.records.lock().unwrap().insert(id.to_string(), envelope);
        self
    }

    pub fn failing_fetch(self, err: ApiError) -> Self {
        *self.fetch_error.lock().unwrap() = Some(err);
        self
    }

    pub fn respond_with(self, result: Result<SubmitResponse, ApiError>) -> Self {
        self.submissions.lock().unwrap().push_back(result);
        self
    }

    pub fn watch_loading(&self, flag: LoadingFlag) {
        self.probe.watch(flag);
    }

    /// Loading-flag values observed at each create/update call.
    pub fn loading_seen(&self) -> Vec<bool> {
        self.probe.seen()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<ServiceCall> {
        self.calls().into_iter().filter(|c| !matches!(c, ServiceCall::Fetch(_))).collect()
    }

    fn next_submission(&self, fallback: SubmitResponse) -> Result<SubmitResponse, ApiError> {
        self.probe.sample();
        self.submissions.lock().unwrap().pop_front().unwrap_or(Ok(fallback))
    }
}

#[async_trait]
impl ServiceApi for MockServiceApi {
    async fn fetch_service_by_id(&self, id: &str) -> Result<ServiceEnvelope, ApiError> {
        self.calls.lock().unwrap().push(ServiceCall::Fetch(id.to_string()));
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or(ServiceEnvelope { status: 404, service: None }))
    }

    async fn create_service(&self, form: &ServiceForm) -> Result<SubmitResponse, ApiError> {
        self.calls.lock().unwrap().push(ServiceCall::Create(form.clone()));
        self.next_submission(SubmitResponse::new(201, "Service created successfully"))
    }

    async fn update_service(&self, id: &str, form: &ServiceForm) -> Result<SubmitResponse, ApiError> {
        self.calls.lock().unwrap().push(ServiceCall::Update(id.to_string(), form.clone()));
        self.next_submission(SubmitResponse::new(200, "Service updated successfully"))
    }
}

#[derive(Default)]
pub struct MockTestimonialApi {
    records: Mutex<HashMap<String, TestimonialRecord>>,
    services: Mutex<Vec<ServiceSummary>>,
    fetch_error: Mutex<Option<ApiError>>,
    list_error: Mutex<Option<ApiError>>,
    submissions: Mutex<VecDeque<Result<SubmitResponse, ApiError>>>,
    calls: Mutex<Vec<TestimonialCall>>,
    probe: LoadingProbe,
}

impl MockTestimonialApi {
    pub fn with_record(self, id: &str, record: TestimonialRecord) -> Self {
        self.records.lock().unwrap().insert(id.to_string(), record);
        self
    }

    pub fn with_services(self, titles: &[&str]) -> Self {
        *self.services.lock().unwrap() = titles
            .iter()
            .enumerate()
            .map(|(i, t)| ServiceSummary { id: format!("svc-{i}"), title: t.to_string() })
            .collect();
        self
    }

    pub fn failing_fetch(self, err: ApiError) -> Self {
        *self.fetch_error.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_list(self, err: ApiError) -> Self {
        *self.list_error.lock().unwrap() = Some(err);
        self
    }

    pub fn respond_with(self, result: Result<SubmitResponse, ApiError>) -> Self {
        self.submissions.lock().unwrap().push_back(result);
        self
    }

    pub fn watch_loading(&self, flag: LoadingFlag) {
        self.probe.watch(flag);
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.probe.seen()
    }

    pub fn calls(&self) -> Vec<TestimonialCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<TestimonialCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, TestimonialCall::Create(_) | TestimonialCall::Update(..)))
            .collect()
    }

    fn next_submission(&self, fallback: SubmitResponse) -> Result<SubmitResponse, ApiError> {
        self.probe.sample();
        self.submissions.lock().unwrap().pop_front().unwrap_or(Ok(fallback))
    }
}

#[async_trait]
impl ServiceCatalog for MockTestimonialApi {
    async fn fetch_published_services(&self) -> Result<ServiceList, ApiError> {
        self.calls.lock().unwrap().push(TestimonialCall::ListServices);
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(ServiceList { services: self.services.lock().unwrap().clone() })
    }
}

#[async_trait]
impl TestimonialApi for MockTestimonialApi {
    async fn fetch_testimonial_by_id(&self, id: &str) -> Result<Option<TestimonialRecord>, ApiError> {
        self.calls.lock().unwrap().push(TestimonialCall::Fetch(id.to_string()));
        if let Some(err) = self.fetch_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn create_testimonial(&self, payload: &TestimonialPayload) -> Result<SubmitResponse, ApiError> {
        self.calls.lock().unwrap().push(TestimonialCall::Create(payload.clone()));
        self.next_submission(SubmitResponse::new(201, "Testimonial created successfully"))
    }

    async fn update_testimonial(&self, id: &str, payload: &TestimonialPayload) -> Result<SubmitResponse, ApiError> {
        self.calls.lock().unwrap().push(TestimonialCall::Update(id.to_string(), payload.clone()));
        self.next_submission(SubmitResponse::new(200, "Testimonial updated successfully"))
    }
}
