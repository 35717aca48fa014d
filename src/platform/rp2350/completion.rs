//! Completion reporting over the defmt log
//!
//! The host side test runner scans the RTT log for the `{{success}}` or
//! `{{failure}}` marker followed by `{{end}}`.

use crate::platform::traits::CompletionReporter;

/// Reports the verdict as log markers
#[derive(Debug, Default)]
pub struct DefmtReporter;

impl DefmtReporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }
}

impl CompletionReporter for DefmtReporter {
    fn notify_completion(&mut self, success: bool) {
        if success {
            crate::log_info!("{{{{success}}}}");
        } else {
            crate::log_info!("{{{{failure}}}}");
        }
        crate::log_info!("{{{{end}}}}");
    }
}
