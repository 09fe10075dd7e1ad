use std::sync::Mutex;

use super::{Navigator, NoticeKind, Notifier};

/// Keeps every notice in arrival order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices.lock().unwrap().iter().filter(|(k, _)| *k == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        self.notices.lock().unwrap().push((kind, message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}
