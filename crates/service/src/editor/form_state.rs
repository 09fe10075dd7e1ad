use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use models::{MissingField, SubmitResponse};

pub(crate) const GENERIC_FAILURE: &str = "Something went wrong!";
pub(crate) const FIX_HIGHLIGHTED: &str = "Please fix the highlighted errors.";
pub(crate) const SAVED: &str = "Saved successfully";

/// Helper texts keyed by field error key (`title`, `faqs.title`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Entries lacking a name or a message are dropped.
    pub fn from_missing_fields(fields: &[MissingField]) -> Self {
        let mut errors = Self::default();
        for field in fields {
            if let (Some(name), Some(message)) = (field.name.as_deref(), field.message.as_deref()) {
                if !name.is_empty() && !message.is_empty() {
                    errors.insert(name, message);
                }
            }
        }
        errors
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn clear(&mut self) { self.0.clear() }
}

/// Shared "request in flight" flag that drives the submit control.
///
/// Cloning yields another handle to the same flag, so a renderer can watch it
/// while the editor is busy awaiting the API.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped.
    pub fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.clone())
    }
}

/// Lowers the loading flag on drop, whichever way the submission ends.
#[must_use = "the loading flag drops as soon as the guard does"]
#[derive(Debug)]
pub struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

/// What a submit attempt ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 200/201: notified and navigated to the list page.
    Saved,
    /// Client-side validation failed; the API was not called.
    Invalid,
    /// The API answered with field errors.
    Rejected,
    /// Any other answer, or the call itself failed.
    Failed,
}

/// Content of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLabel {
    Spinner,
    Text(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// How a submit response maps onto the form.
#[derive(Debug, PartialEq)]
pub(crate) enum Verdict {
    Saved { message: String },
    Rejected { errors: FieldErrors, message: String },
    Failed { message: Option<String> },
}

pub(crate) fn classify(resp: &SubmitResponse) -> Verdict {
    if resp.is_success() {
        return Verdict::Saved { message: resp.message().unwrap_or(SAVED).to_string() };
    }
    match resp.missing_fields.as_deref() {
        Some(fields) => Verdict::Rejected {
            errors: FieldErrors::from_missing_fields(fields),
            message: resp.message().unwrap_or(FIX_HIGHLIGHTED).to_string(),
        },
        None => Verdict::Failed { message: resp.message().map(str::to_string) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_lowers_flag_on_drop() {
        let flag = LoadingFlag::default();
        let watcher = flag.clone();
        {
            let _guard = flag.begin();
            assert!(watcher.is_loading());
        }
        assert!(!watcher.is_loading());
    }

    #[test]
    fn incomplete_missing_fields_are_skipped() {
        let errors = FieldErrors::from_missing_fields(&[
            MissingField::new("title", "Required"),
            MissingField { name: Some("slug".into()), message: None },
            MissingField { name: None, message: Some("orphan".into()) },
        ]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("title"), Some("Required"));
    }

    #[test]
    fn classify_covers_each_branch() {
        assert_eq!(
            classify(&SubmitResponse::new(201, "Created")),
            Verdict::Saved { message: "Created".into() }
        );

        let rejected = SubmitResponse { status: 400, message: None, missing_fields: Some(vec![MissingField::new("title", "Required")]) };
        match classify(&rejected) {
            Verdict::Rejected { errors, message } => {
                assert_eq!(errors.get("title"), Some("Required"));
                assert_eq!(message, FIX_HIGHLIGHTED);
            }
            other => panic!("unexpected verdict {other:?}"),
        }

        assert_eq!(classify(&SubmitResponse::new(500, "")), Verdict::Failed { message: None });
        assert_eq!(
            classify(&SubmitResponse::new(409, "Slug taken")),
            Verdict::Failed { message: Some("Slug taken".into()) }
        );
    }
}
