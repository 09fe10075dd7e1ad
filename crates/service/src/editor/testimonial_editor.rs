use std::sync::Arc;

use models::{Rating, TestimonialPayload, TestimonialRecord};
use tracing::{debug, error, info, instrument, warn};

use super::form_state::{
    classify, FieldErrors, LoadingFlag, SelectOption, SubmitLabel, SubmitOutcome, Verdict, GENERIC_FAILURE,
};
use crate::api::{ServiceCatalog, TestimonialApi};
use crate::ui::{Navigator, NoticeKind, Notifier};

const INTERNAL_ERROR: &str = "Internal server error.";

/// Inputs of the testimonial form, in render order. All are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestimonialField {
    Name,
    Service,
    Location,
    Date,
    Rating,
    Description,
}

impl TestimonialField {
    pub const ALL: [TestimonialField; 6] = [
        TestimonialField::Name,
        TestimonialField::Service,
        TestimonialField::Location,
        TestimonialField::Date,
        TestimonialField::Rating,
        TestimonialField::Description,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TestimonialField::Name => "name",
            TestimonialField::Service => "service",
            TestimonialField::Location => "location",
            TestimonialField::Date => "date",
            TestimonialField::Rating => "rating",
            TestimonialField::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TestimonialField::Name => "Name",
            TestimonialField::Service => "Select a Service",
            TestimonialField::Location => "Location",
            TestimonialField::Date => "Date",
            TestimonialField::Rating => "Rating",
            TestimonialField::Description => "Description",
        }
    }

    /// Empty-choice text for the two select inputs.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            TestimonialField::Service => Some("Select a Service"),
            TestimonialField::Rating => Some("Select Rating"),
            _ => None,
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            TestimonialField::Name => "Name is required",
            TestimonialField::Service => "Service is required",
            TestimonialField::Location => "Location is required",
            TestimonialField::Date => "Date is required",
            TestimonialField::Rating => "Rating is required",
            TestimonialField::Description => "Description is required",
        }
    }
}

/// Editor for a customer testimonial attached to a service by title.
pub struct TestimonialEditor<A: TestimonialApi + ServiceCatalog> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    id: Option<String>,
    record: TestimonialRecord,
    service_options: Vec<SelectOption>,
    errors: FieldErrors,
    loading: LoadingFlag,
    list_route: String,
}

impl<A: TestimonialApi + ServiceCatalog> TestimonialEditor<A> {
    pub fn new(
        api: Arc<A>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        id: Option<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            id: id.filter(|id| !id.is_empty()),
            record: TestimonialRecord::default(),
            service_options: Vec::new(),
            errors: FieldErrors::default(),
            loading: LoadingFlag::default(),
            list_route: "/testimonials".into(),
        }
    }

    pub fn with_list_route(mut self, route: impl Into<String>) -> Self {
        self.list_route = route.into();
        self
    }

    pub fn id(&self) -> Option<&str> { self.id.as_deref() }

    pub fn is_edit(&self) -> bool { self.id.is_some() }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() { "Edit Testimonial" } else { "Add Testimonial" }
    }

    pub fn record(&self) -> &TestimonialRecord { &self.record }

    pub fn errors(&self) -> &FieldErrors { &self.errors }

    pub fn loading_flag(&self) -> LoadingFlag { self.loading.clone() }

    pub fn submit_disabled(&self) -> bool { self.loading.is_loading() }

    pub fn submit_label(&self) -> SubmitLabel {
        if self.loading.is_loading() {
            SubmitLabel::Spinner
        } else if self.is_edit() {
            SubmitLabel::Text("Update")
        } else {
            SubmitLabel::Text("Save")
        }
    }

    /// Published services, `value` and `label` both the service title.
    pub fn service_options(&self) -> &[SelectOption] { &self.service_options }

    pub fn rating_options(&self) -> Vec<SelectOption> {
        Rating::choices()
            .map(|r| SelectOption { value: r.to_string(), label: r.to_string() })
            .collect()
    }

    /// Current input value; an unset rating reads as the empty choice.
    pub fn value(&self, field: TestimonialField) -> String {
        let r = &self.record;
        match field {
            TestimonialField::Name => r.name.clone(),
            TestimonialField::Service => r.service.clone(),
            TestimonialField::Location => r.location.clone(),
            TestimonialField::Date => r.date.clone(),
            TestimonialField::Rating => r.rating.map(|v| v.to_string()).unwrap_or_default(),
            TestimonialField::Description => r.description.clone(),
        }
    }

    /// Rating accepts a select value (`"4.5"`); anything else clears it.
    pub fn set(&mut self, field: TestimonialField, value: impl Into<String>) {
        let value = value.into();
        let r = &mut self.record;
        match field {
            TestimonialField::Name => r.name = value,
            TestimonialField::Service => r.service = value,
            TestimonialField::Location => r.location = value,
            TestimonialField::Date => r.date = value,
            TestimonialField::Rating => r.rating = value.parse::<Rating>().ok(),
            TestimonialField::Description => r.description = value,
        }
    }

    pub fn set_rating(&mut self, rating: Option<Rating>) {
        self.record.rating = rating;
    }

    pub fn is_published(&self) -> bool { self.record.published }

    pub fn toggle_published(&mut self) {
        self.record.published = !self.record.published;
    }

    pub fn published_label(&self) -> &'static str {
        if self.record.published { "Published: Yes" } else { "Published: No" }
    }

    pub fn helper_text(&self, field: TestimonialField) -> Option<&str> {
        self.errors.get(field.key())
    }

    /// Fill the service dropdown, then the record in edit mode. Both fetches
    /// fail silently apart from the log.
    #[instrument(skip(self), fields(id = ?self.id))]
    pub async fn load(&mut self) {
        match self.api.fetch_published_services().await {
            Ok(list) => {
                self.service_options = list
                    .services
                    .into_iter()
                    .map(|s| SelectOption { value: s.title.clone(), label: s.title })
                    .collect();
                debug!(event = "services_loaded", count = self.service_options.len(), "service options loaded");
            }
            Err(e) => {
                error!(event = "services_load_failed", code = e.code(), error = %e, "error fetching services list");
            }
        }

        let Some(id) = self.id.as_deref() else {
            debug!(event = "create_mode", "no id, keeping blank testimonial form");
            return;
        };
        match self.api.fetch_testimonial_by_id(id).await {
            Ok(Some(record)) => {
                self.record = record;
                info!(event = "record_loaded", "testimonial loaded into form");
            }
            Ok(None) => warn!(event = "load_ignored", "testimonial not found"),
            Err(e) => {
                error!(event = "load_failed", code = e.code(), error = %e, "error fetching testimonial");
            }
        }
    }

    /// Every required field that is empty, with its message.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in TestimonialField::ALL {
            if self.value(field).is_empty() {
                errors.insert(field.key(), field.required_message());
            }
        }
        errors
    }

    #[instrument(skip(self), fields(id = ?self.id))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.errors.clear();

        let invalid = self.validate();
        if !invalid.is_empty() {
            debug!(event = "validation_failed", fields = ?invalid.keys().collect::<Vec<_>>(), "testimonial incomplete");
            self.errors = invalid;
            return SubmitOutcome::Invalid;
        }
        let payload = match TestimonialPayload::try_from(&self.record) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(event = "validation_failed", error = %e, "testimonial payload rejected");
                let field = TestimonialField::Rating;
                self.errors.insert(field.key(), field.required_message());
                return SubmitOutcome::Invalid;
            }
        };

        let _loading = self.loading.begin();
        let result = match self.id.as_deref() {
            Some(id) => self.api.update_testimonial(id, &payload).await,
            None => self.api.create_testimonial(&payload).await,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(event = "submit_failed", code = e.code(), error = %e, "error saving testimonial");
                self.notifier.notify(NoticeKind::Error, INTERNAL_ERROR);
                return SubmitOutcome::Failed;
            }
        };

        match classify(&response) {
            Verdict::Saved { message } => {
                info!(event = "submit_succeeded", status = response.status, "testimonial saved");
                self.notifier.notify(NoticeKind::Success, &message);
                self.navigator.navigate(&self.list_route);
                SubmitOutcome::Saved
            }
            Verdict::Rejected { errors, message } => {
                warn!(event = "submit_rejected", status = response.status, fields = errors.len(), "testimonial rejected by API");
                self.errors = errors;
                self.notifier.notify(NoticeKind::Error, &message);
                SubmitOutcome::Rejected
            }
            Verdict::Failed { .. } => {
                warn!(event = "submit_failed", status = response.status, "testimonial save failed");
                self.notifier.notify(NoticeKind::Error, GENERIC_FAILURE);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn cancel(&self) {
        self.navigator.navigate(&self.list_route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTestimonialApi;
    use crate::ui::mock::{RecordingNavigator, RecordingNotifier};

    fn editor(id: Option<&str>) -> TestimonialEditor<MockTestimonialApi> {
        TestimonialEditor::new(
            Arc::new(MockTestimonialApi::default()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingNavigator::default()),
            id.map(str::to_string),
        )
    }

    #[test]
    fn blank_form_fails_every_required_field() {
        let errors = editor(None).validate();
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get("rating"), Some("Rating is required"));
    }

    #[test]
    fn rating_binding_parses_select_values() {
        let mut ed = editor(None);
        ed.set(TestimonialField::Rating, "3.5");
        assert_eq!(ed.value(TestimonialField::Rating), "3.5");
        ed.set(TestimonialField::Rating, "");
        assert_eq!(ed.record().rating, None);
        assert_eq!(ed.rating_options().len(), 10);
        assert_eq!(ed.rating_options()[0].value, "0.5");
    }

    #[test]
    fn labels_follow_mode_and_flag() {
        let mut ed = editor(Some("t1"));
        assert_eq!(ed.heading(), "Edit Testimonial");
        assert_eq!(ed.submit_label(), SubmitLabel::Text("Update"));
        assert_eq!(editor(None).submit_label(), SubmitLabel::Text("Save"));
        assert_eq!(ed.published_label(), "Published: Yes");
        ed.toggle_published();
        assert_eq!(ed.published_label(), "Published: No");
        let _busy = ed.loading_flag().begin();
        assert_eq!(ed.submit_label(), SubmitLabel::Spinner);
        assert!(ed.submit_disabled());
    }
}
