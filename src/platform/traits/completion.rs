//! Test completion reporting
//!
//! The harness that flashes and watches the board learns the verdict through
//! this interface. It is the only structured output of a test run.

/// Receives the final pass/fail verdict of a test run
pub trait CompletionReporter {
    /// Deliver the verdict; `true` means the test passed
    fn notify_completion(&mut self, success: bool);
}
