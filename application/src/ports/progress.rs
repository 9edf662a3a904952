//! Progress notification port
//!
//! Defines the interface for reporting the lifecycle of a completion request.

/// Callback for progress updates while a request is in flight
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, status line, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the request is sent
    fn on_request_start(&self, query: &str);

    /// Called once the request resolved, successfully or not
    fn on_request_end(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _query: &str) {}
    fn on_request_end(&self, _success: bool) {}
}
