//! Transient, dismissible user notices.

use crate::map::session::StyleStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    PermissionDenied,
    NoResults,
    SearchFailed,
    StyleLoadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn permission_denied() -> Self {
        Self {
            kind: NoticeKind::PermissionDenied,
            message: "Location permission denied. Enable it in settings to see your position."
                .to_string(),
        }
    }

    pub fn no_results() -> Self {
        Self {
            kind: NoticeKind::NoResults,
            message: "No results found".to_string(),
        }
    }

    pub fn search_failed(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::SearchFailed,
            message: format!("Search failed: {}", message.into()),
        }
    }

    pub fn style_failed(stage: StyleStage, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::StyleLoadFailed,
            message: format!("Map {} style failed to load: {}", stage, message.into()),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Where the screen surfaces notices (a toast, a snackbar, a status line).
pub trait NoticeSink {
    fn show(&mut self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotices;

impl NoticeSink for LogNotices {
    fn show(&mut self, notice: Notice) {
        log::warn!("{}", notice);
    }
}

/// Keeps every notice shown, in order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn count(&self, kind: NoticeKind) -> usize {
        self.notices.iter().filter(|n| n.kind == kind).count()
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl NoticeSink for NoticeLog {
    fn show(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl<F: FnMut(Notice)> NoticeSink for F {
    fn show(&mut self, notice: Notice) {
        self(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_is_carried() {
        let notice = Notice::search_failed("connection reset");
        assert_eq!(notice.kind, NoticeKind::SearchFailed);
        assert!(notice.to_string().contains("connection reset"));
    }

    #[test]
    fn test_notice_log_counts_by_kind() {
        let mut log = NoticeLog::new();
        log.show(Notice::no_results());
        log.show(Notice::no_results());
        log.show(Notice::permission_denied());

        assert_eq!(log.count(NoticeKind::NoResults), 2);
        assert_eq!(log.take().len(), 3);
        assert!(log.notices().is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |notice: Notice| seen.push(notice.kind);
            sink.show(Notice::style_failed(StyleStage::Base, "offline"));
        }
        assert_eq!(seen, vec![NoticeKind::StyleLoadFailed]);
    }
}
