//! UI seams: the global alert surface and router navigation.

use std::fmt;

pub mod mock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Success => f.write_str("success"),
            NoticeKind::Error => f.write_str("error"),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, message: &str);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
