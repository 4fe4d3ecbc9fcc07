//! Reporting capability.
//!
//! The core never talks to a screen. It hands user-facing notices and
//! diagnostic detail to a [`Reporter`], and the embedding UI decides how to
//! show them.

use log::{error, warn};
use std::cell::RefCell;

pub trait Reporter {
    /// A short, user-facing message.
    fn notify_user(&self, message: &str);

    /// Diagnostic detail for logs, never shown to the user directly.
    fn log_error(&self, detail: &str);
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn notify_user(&self, message: &str) {
        (**self).notify_user(message)
    }

    fn log_error(&self, detail: &str) {
        (**self).log_error(detail)
    }
}

/// Sends both streams to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn notify_user(&self, message: &str) {
        warn!("{}", message);
    }

    fn log_error(&self, detail: &str) {
        error!("{}", detail);
    }
}

/// Keeps everything it is told, in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    notices: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn notify_user(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn log_error(&self, detail: &str) {
        self.errors.borrow_mut().push(detail.to_string());
    }
}
