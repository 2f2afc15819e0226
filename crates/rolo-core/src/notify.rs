//! User-facing notification seam.
//!
//! Store operations report outcomes as transient toasts and blocking modals;
//! the consumer decides how to surface them (terminal output, UI layer, or
//! just the log).

use tracing::{info, warn};

/// Visual flavor of a transient toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Show a transient, non-blocking notification.
    fn toast(&self, kind: ToastKind, message: &str);

    /// Show a blocking confirmation dialog with a title and body.
    fn modal(&self, title: &str, body: &str);
}

/// Notifier that forwards everything to the tracing subscriber.
///
/// The fallback for consumers that have no notification surface of their own.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn toast(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => info!("{}", message),
            ToastKind::Error => warn!("{}", message),
        }
    }

    fn modal(&self, title: &str, body: &str) {
        info!("{}: {}", title, body);
    }
}
