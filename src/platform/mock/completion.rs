//! Mock completion reporter for testing

use crate::platform::traits::CompletionReporter;
use std::vec::Vec;

/// Records every verdict it receives
#[derive(Debug, Default)]
pub struct MockReporter {
    verdicts: Vec<bool>,
}

impl MockReporter {
    /// Create a new mock reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All verdicts delivered so far, in order
    pub fn verdicts(&self) -> &[bool] {
        &self.verdicts
    }
}

impl CompletionReporter for MockReporter {
    fn notify_completion(&mut self, success: bool) {
        self.verdicts.push(success);
    }
}
