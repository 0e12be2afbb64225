//! Histogram helpers

use super::labels;
use std::time::Duration;

/// Duration of one connect attempt (socket creation through connect)
pub fn attempt_duration(outcome: &'static str, elapsed: Duration) {
    metrics::histogram!(labels::ATTEMPT_DURATION_MS, "outcome" => outcome)
        .record(elapsed.as_secs_f64() * 1000.0);
}
