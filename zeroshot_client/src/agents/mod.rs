//! Zero-shot agents.
//!
//! Each call is one synchronous round trip: reset the log record, render the prompt, request a
//! greedy completion within the task budget, parse, record, return. No retries.

pub mod classification;
pub mod local_model;
pub mod sql_generation;

use crate::log::LogRecord;
use local_model::LocalModelAgent;

pub trait Agent {
    fn local_model(&self) -> &LocalModelAgent;

    fn local_model_mut(&mut self) -> &mut LocalModelAgent;

    /// Feedback hook called by the benchmark runner after each row.
    ///
    /// Zero-shot agents do not learn, so nothing changes and this returns `false`.
    fn update(&mut self, _correctness: bool) -> bool {
        false
    }

    /// Record of the most recent call, if any.
    fn log_info(&self) -> Option<&LogRecord> {
        self.local_model().log_info.as_ref()
    }

    fn reset_log_info(&mut self) {
        self.local_model_mut().log_info = None;
    }
}
