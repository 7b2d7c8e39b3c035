use chrono::{DateTime, Utc};

/// Kind tag carried by a platform window notification.
///
/// Only [`EventKind::WindowStateChanged`] drives blocking decisions; real
/// platforms deliver the other kinds too and they are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    WindowStateChanged,
    WindowContentChanged,
    Other,
}

/// Foreground-application-change notification.
#[derive(Debug, Clone)]
pub struct ForegroundEvent {
    pub kind: EventKind,
    pub package: String,
    pub timestamp: DateTime<Utc>,
}

impl ForegroundEvent {
    /// Window-state-changed notification for `package`, stamped now.
    #[must_use]
    pub fn window_change(package: impl Into<String>) -> Self {
        Self {
            kind: EventKind::WindowStateChanged,
            package: package.into(),
            timestamp: Utc::now(),
        }
    }
}
