//! Progress reporting while a completion request is in flight

use askline_application::ProgressNotifier;
use askline_domain::util::truncate_str;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown on stderr until the answer arrives
pub struct SpinnerProgress {
    model: String,
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl ProgressNotifier for SpinnerProgress {
    fn on_request_start(&self, query: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(self.model.clone());
        pb.set_message(format!("thinking about \"{}\"", truncate_str(query, 40)));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_request_end(&self, _success: bool) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let progress = SpinnerProgress::new("llama-3.3-70b-versatile");
        progress.on_request_start("How do lifetimes work?");
        assert!(progress.bar.lock().unwrap().is_some());
        progress.on_request_end(true);
        assert!(progress.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_end_without_start_is_harmless() {
        let progress = SpinnerProgress::new("m");
        progress.on_request_end(false);
        assert!(progress.bar.lock().unwrap().is_none());
    }
}
