//! Screens - pure state machines, one per view
//!
//! A screen turns operator intents into `ApiCall`s and folds `ApiOutcome`s
//! back into its own state. It never performs I/O itself.

pub mod courses;
pub mod input;
pub mod lessons;
pub mod login;
pub mod path;
pub mod register;

use std::time::{Duration, Instant};

pub use courses::CoursesScreen;
pub use input::TextInput;
pub use lessons::LessonManager;
pub use login::LoginScreen;
pub use register::RegisterScreen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
    Success,
}

/// A message shown on a screen, optionally expiring
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    expires_at: Option<Instant>,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
            expires_at: None,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            text: text.into(),
            expires_at: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
            expires_at: None,
        }
    }

    /// Success message that disappears `ttl` after `now`
    pub fn flash(text: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Notice {
            kind: NoticeKind::Success,
            text: text.into(),
            expires_at: Some(now + ttl),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Drop `notice` if it has expired; true when something was removed
pub fn expire_notice(notice: &mut Option<Notice>, now: Instant) -> bool {
    if notice.as_ref().is_some_and(|n| n.is_expired(now)) {
        *notice = None;
        true
    } else {
        false
    }
}

/// Destructive action waiting for a yes/no
#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmAction {
    DeleteCourse { id: String, title: String },
    DeleteLesson { id: String, title: String },
}

impl ConfirmAction {
    pub fn prompt(&self) -> String {
        match self {
            ConfirmAction::DeleteCourse { title, .. } => format!("Delete course \"{}\"?", title),
            ConfirmAction::DeleteLesson { title, .. } => format!("Delete lesson \"{}\"?", title),
        }
    }
}

/// Whether keystrokes go to a text field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Keep a list selection inside `len`
pub(crate) fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_expiry() {
        let now = Instant::now();
        let mut notice = Some(Notice::flash("done", now, Duration::from_secs(2)));

        assert!(!expire_notice(&mut notice, now + Duration::from_millis(1999)));
        assert!(notice.is_some());
        assert!(expire_notice(&mut notice, now + Duration::from_secs(2)));
        assert!(notice.is_none());
    }

    #[test]
    fn test_plain_notice_never_expires() {
        let now = Instant::now();
        let mut notice = Some(Notice::error("boom"));
        assert!(!expire_notice(&mut notice, now + Duration::from_secs(3600)));
    }

    #[test]
    fn test_clamp_selection() {
        assert_eq!(clamp_selection(5, 0), 0);
        assert_eq!(clamp_selection(5, 3), 2);
        assert_eq!(clamp_selection(1, 3), 1);
    }
}
