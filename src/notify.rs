//! One-shot user notifications
//!
//! The core announces things like "all modules viewed" through this sink and
//! never waits on or inspects the result.

use std::fmt;

/// Kind of notice, used by the presentation layer for styling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeKind {
    #[default]
    Success,
    Info,
    Warning,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
        };
        f.write_str(name)
    }
}

/// Fire-and-forget notification sink
pub trait Notifier {
    /// Announce `message`
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Notifier that writes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Warning => tracing::warn!(%kind, "{}", message),
            NoticeKind::Success | NoticeKind::Info => tracing::info!(%kind, "{}", message),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{NoticeKind, Notifier};

    /// Notifier that remembers everything it was told
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNotifier {
        pub notices: Rc<RefCell<Vec<(String, NoticeKind)>>>,
    }

    impl RecordingNotifier {
        pub fn count(&self) -> usize {
            self.notices.borrow().len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, kind: NoticeKind) {
            self.notices.borrow_mut().push((message.to_string(), kind));
        }
    }
}
