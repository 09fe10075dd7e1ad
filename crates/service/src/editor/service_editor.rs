use std::sync::Arc;

use models::{DeliveryInfo, Faq, ServiceEnvelope, ServiceForm, ServiceRecord, VideoInfo};
use tracing::{debug, error, info, instrument, warn};

use super::form_state::{classify, FieldErrors, LoadingFlag, SubmitLabel, SubmitOutcome, Verdict, GENERIC_FAILURE};
use crate::api::ServiceApi;
use crate::ui::{Navigator, NoticeKind, Notifier};

/// Text inputs of the service form, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceField {
    Title,
    MetaDescription,
    Description,
    Slug,
    ShortDescription,
    Detail,
    FaqTitle,
    FaqDescription,
    DeliveryDescription,
    DeliveryImage,
    VideoDescription,
    VideoUrl,
}

impl ServiceField {
    pub const ALL: [ServiceField; 12] = [
        ServiceField::Title,
        ServiceField::MetaDescription,
        ServiceField::Description,
        ServiceField::Slug,
        ServiceField::ShortDescription,
        ServiceField::Detail,
        ServiceField::FaqTitle,
        ServiceField::FaqDescription,
        ServiceField::DeliveryDescription,
        ServiceField::DeliveryImage,
        ServiceField::VideoDescription,
        ServiceField::VideoUrl,
    ];

    /// Key under which the API reports errors for this field.
    pub fn key(self) -> &'static str {
        match self {
            ServiceField::Title => "title",
            ServiceField::MetaDescription => "metaDescription",
            ServiceField::Description => "description",
            ServiceField::Slug => "slug",
            ServiceField::ShortDescription => "short_description",
            ServiceField::Detail => "detail",
            ServiceField::FaqTitle => "faqs.title",
            ServiceField::FaqDescription => "faqs.description",
            ServiceField::DeliveryDescription => "how_we_delivered.description",
            ServiceField::DeliveryImage => "how_we_delivered.image",
            ServiceField::VideoDescription => "video.description",
            ServiceField::VideoUrl => "video.url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceField::Title => "Title",
            ServiceField::MetaDescription => "Meta Description",
            ServiceField::Description => "Description",
            ServiceField::Slug => "Slug",
            ServiceField::ShortDescription => "Short Description",
            ServiceField::Detail => "Detail",
            ServiceField::FaqTitle => "FAQs Title",
            ServiceField::FaqDescription => "FAQs Description",
            ServiceField::DeliveryDescription => "Description",
            ServiceField::DeliveryImage => "Image URL",
            ServiceField::VideoDescription => "Video Description",
            ServiceField::VideoUrl => "Video URL",
        }
    }

    /// Suggested visible rows; 1 for single-line inputs.
    pub fn rows(self) -> u8 {
        match self {
            ServiceField::Detail => 4,
            ServiceField::Description => 3,
            ServiceField::ShortDescription
            | ServiceField::FaqDescription
            | ServiceField::DeliveryDescription
            | ServiceField::VideoDescription => 2,
            _ => 1,
        }
    }
}

/// Publish switches of the service form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceToggle {
    Published,
    Faq,
    Delivery,
    Video,
}

/// Editor for a service page and its FAQ, delivery and video sections.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::api::mock::MockServiceApi;
/// use service::editor::{ServiceEditor, ServiceField, SubmitOutcome};
/// use service::ui::mock::{RecordingNavigator, RecordingNotifier};
///
/// let api = Arc::new(MockServiceApi::default());
/// let nav = Arc::new(RecordingNavigator::default());
/// let mut editor = ServiceEditor::new(api, Arc::new(RecordingNotifier::default()), nav.clone(), None);
/// editor.set(ServiceField::Title, "Branding");
/// let outcome = tokio_test::block_on(editor.submit());
/// assert_eq!(outcome, SubmitOutcome::Saved);
/// assert_eq!(nav.visits(), vec!["/services".to_string()]);
/// ```
pub struct ServiceEditor<A: ServiceApi> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    id: Option<String>,
    record: ServiceRecord,
    errors: FieldErrors,
    loading: LoadingFlag,
    list_route: String,
}

impl<A: ServiceApi> ServiceEditor<A> {
    /// `id` selects edit mode; `None` starts a blank create form.
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
            record: ServiceRecord::blank(),
            errors: FieldErrors::default(),
            loading: LoadingFlag::default(),
            list_route: "/services".into(),
        }
    }

    pub fn with_list_route(mut self, route: impl Into<String>) -> Self {
        self.list_route = route.into();
        self
    }

    pub fn id(&self) -> Option<&str> { self.id.as_deref() }

    pub fn is_edit(&self) -> bool { self.id.is_some() }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() { "Edit Service" } else { "Add Service" }
    }

    pub fn record(&self) -> &ServiceRecord { &self.record }

    pub fn errors(&self) -> &FieldErrors { &self.errors }

    pub fn loading_flag(&self) -> LoadingFlag { self.loading.clone() }

    pub fn submit_disabled(&self) -> bool { self.loading.is_loading() }

    pub fn submit_label(&self) -> SubmitLabel {
        if self.loading.is_loading() { SubmitLabel::Text("Saving...") } else { SubmitLabel::Text("Save") }
    }

    pub fn value(&self, field: ServiceField) -> &str {
        let r = &self.record;
        match field {
            ServiceField::Title => &r.title,
            ServiceField::MetaDescription => &r.meta_description,
            ServiceField::Description => &r.description,
            ServiceField::Slug => &r.slug,
            ServiceField::ShortDescription => &r.short_description,
            ServiceField::Detail => &r.detail,
            ServiceField::FaqTitle => &r.faq.title,
            ServiceField::FaqDescription => &r.faq.description,
            ServiceField::DeliveryDescription => &r.delivery.description,
            ServiceField::DeliveryImage => &r.delivery.image,
            ServiceField::VideoDescription => &r.video.description,
            ServiceField::VideoUrl => &r.video.url,
        }
    }

    /// Nested sections are replaced whole with one key overridden.
    pub fn set(&mut self, field: ServiceField, value: impl Into<String>) {
        let value = value.into();
        let r = &mut self.record;
        match field {
            ServiceField::Title => r.title = value,
            ServiceField::MetaDescription => r.meta_description = value,
            ServiceField::Description => r.description = value,
            ServiceField::Slug => r.slug = value,
            ServiceField::ShortDescription => r.short_description = value,
            ServiceField::Detail => r.detail = value,
            ServiceField::FaqTitle => r.faq = Faq { title: value, ..r.faq.clone() },
            ServiceField::FaqDescription => r.faq = Faq { description: value, ..r.faq.clone() },
            ServiceField::DeliveryDescription => {
                r.delivery = DeliveryInfo { description: value, ..r.delivery.clone() }
            }
            ServiceField::DeliveryImage => r.delivery = DeliveryInfo { image: value, ..r.delivery.clone() },
            ServiceField::VideoDescription => r.video = VideoInfo { description: value, ..r.video.clone() },
            ServiceField::VideoUrl => r.video = VideoInfo { url: value, ..r.video.clone() },
        }
    }

    pub fn is_on(&self, toggle: ServiceToggle) -> bool {
        match toggle {
            ServiceToggle::Published => self.record.published,
            ServiceToggle::Faq => self.record.faq.published,
            ServiceToggle::Delivery => self.record.delivery.published,
            ServiceToggle::Video => self.record.video.published,
        }
    }

    pub fn toggle(&mut self, toggle: ServiceToggle) {
        let r = &mut self.record;
        match toggle {
            ServiceToggle::Published => r.published = !r.published,
            ServiceToggle::Faq => r.faq = Faq { published: !r.faq.published, ..r.faq.clone() },
            ServiceToggle::Delivery => {
                r.delivery = DeliveryInfo { published: !r.delivery.published, ..r.delivery.clone() }
            }
            ServiceToggle::Video => r.video = VideoInfo { published: !r.video.published, ..r.video.clone() },
        }
    }

    pub fn toggle_label(&self, toggle: ServiceToggle) -> &'static str {
        match (toggle, self.is_on(toggle)) {
            (ServiceToggle::Published, true) => "Public",
            (_, true) => "Published",
            (_, false) => "Draft",
        }
    }

    /// Server-provided error text shown under `field`, if any.
    pub fn helper_text(&self, field: ServiceField) -> Option<&str> {
        self.errors.get(field.key())
    }

    /// Populate the form from the API in edit mode. Failures leave the form
    /// as it was and are only logged.
    #[instrument(skip(self), fields(id = ?self.id))]
    pub async fn load(&mut self) {
        let Some(id) = self.id.as_deref() else {
            debug!(event = "create_mode", "no id, keeping blank service form");
            return;
        };
        match self.api.fetch_service_by_id(id).await {
            Ok(ServiceEnvelope { status: 200, service: Some(record) }) => {
                self.record = record;
                info!(event = "record_loaded", "service loaded into form");
            }
            Ok(envelope) => {
                warn!(event = "load_ignored", status = envelope.status, "service fetch returned no record");
            }
            Err(e) => {
                error!(event = "load_failed", code = e.code(), error = %e, "error fetching service");
            }
        }
    }

    /// Send the whole record as a create (no id) or update (id) call.
    #[instrument(skip(self), fields(id = ?self.id))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.errors.clear();
        let _loading = self.loading.begin();

        let form = ServiceForm::from(&self.record);
        let result = match self.id.as_deref() {
            Some(id) => self.api.update_service(id, &form).await,
            None => self.api.create_service(&form).await,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!(event = "submit_failed", code = e.code(), error = %e, "error submitting service");
                self.notifier.notify(NoticeKind::Error, GENERIC_FAILURE);
                return SubmitOutcome::Failed;
            }
        };

        match classify(&response) {
            Verdict::Saved { message } => {
                info!(event = "submit_succeeded", status = response.status, "service saved");
                self.notifier.notify(NoticeKind::Success, &message);
                self.navigator.navigate(&self.list_route);
                SubmitOutcome::Saved
            }
            Verdict::Rejected { errors, message } => {
                warn!(event = "submit_rejected", status = response.status, fields = errors.len(), "service rejected by API");
                self.errors = errors;
                self.notifier.notify(NoticeKind::Error, &message);
                SubmitOutcome::Rejected
            }
            Verdict::Failed { message } => {
                warn!(event = "submit_failed", status = response.status, "service save failed");
                self.notifier.notify(NoticeKind::Error, message.as_deref().unwrap_or(GENERIC_FAILURE));
                SubmitOutcome::Failed
            }
        }
    }

    /// Leave the form without saving.
    pub fn cancel(&self) {
        self.navigator.navigate(&self.list_route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockServiceApi;
    use crate::ui::mock::{RecordingNavigator, RecordingNotifier};

    fn editor(id: Option<&str>) -> ServiceEditor<MockServiceApi> {
        ServiceEditor::new(
            Arc::new(MockServiceApi::default()),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingNavigator::default()),
            id.map(str::to_string),
        )
    }

    #[test]
    fn heading_and_label_follow_mode() {
        let create = editor(None);
        assert_eq!(create.heading(), "Add Service");
        assert_eq!(create.submit_label(), SubmitLabel::Text("Save"));
        let edit = editor(Some("abc"));
        assert_eq!(edit.heading(), "Edit Service");
        assert!(!editor(Some("")).is_edit());
    }

    #[test]
    fn nested_edit_keeps_sibling_keys() {
        let mut ed = editor(None);
        ed.set(ServiceField::FaqTitle, "Why us?");
        ed.set(ServiceField::FaqDescription, "Because.");
        ed.toggle(ServiceToggle::Faq);
        assert_eq!(ed.record().faq, Faq { title: "Why us?".into(), description: "Because.".into(), published: true });

        ed.toggle(ServiceToggle::Faq);
        assert_eq!(ed.value(ServiceField::FaqTitle), "Why us?");
        assert_eq!(ed.value(ServiceField::FaqDescription), "Because.");
        assert!(!ed.is_on(ServiceToggle::Faq));
    }

    #[test]
    fn every_field_round_trips_through_binding() {
        let mut ed = editor(None);
        for field in ServiceField::ALL {
            ed.set(field, field.key());
        }
        for field in ServiceField::ALL {
            assert_eq!(ed.value(field), field.key());
        }
    }

    #[test]
    fn toggle_labels() {
        let mut ed = editor(None);
        assert_eq!(ed.toggle_label(ServiceToggle::Published), "Public");
        ed.toggle(ServiceToggle::Published);
        assert_eq!(ed.toggle_label(ServiceToggle::Published), "Draft");
        assert_eq!(ed.toggle_label(ServiceToggle::Video), "Draft");
        ed.toggle(ServiceToggle::Video);
        assert_eq!(ed.toggle_label(ServiceToggle::Video), "Published");
    }

    #[tokio::test]
    async fn create_mode_load_does_not_call_api() {
        let api = Arc::new(MockServiceApi::default());
        let mut ed = ServiceEditor::new(
            api.clone(),
            Arc::new(RecordingNotifier::default()),
            Arc::new(RecordingNavigator::default()),
            None,
        );
        ed.load().await;
        assert!(api.calls().is_empty());
        assert_eq!(ed.record(), &ServiceRecord::blank());
    }
}
