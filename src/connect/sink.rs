//! Diagnostic sink for swallowed attempt failures

use super::attempt::{AttemptFailure, AttemptStage};
use std::sync::Arc;

/// Receives failures of candidates that were followed by another candidate
///
/// Called once per intermediate failure, from whatever thread runs the
/// connector. Implementations cannot fail: a broken sink must never replace
/// the connection result.
pub trait DiagnosticSink: Send + Sync {
    /// An attempt failed and the connector is moving on
    fn attempt_failed(&self, failure: &AttemptFailure);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn attempt_failed(&self, failure: &AttemptFailure) {
        (**self).attempt_failed(failure)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn attempt_failed(&self, failure: &AttemptFailure) {
        (**self).attempt_failed(failure)
    }
}

/// Forwards failures to `tracing` at DEBUG level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn attempt_failed(&self, failure: &AttemptFailure) {
        let candidate = &failure.candidate;
        match failure.stage {
            AttemptStage::Create => tracing::debug!(
                position = failure.position,
                total = failure.total,
                family = %candidate.family,
                socket_type = %candidate.socket_type,
                protocol = %candidate.protocol,
                error = %failure.source,
                "socket creation failed, trying next candidate"
            ),
            AttemptStage::Connect => tracing::debug!(
                position = failure.position,
                total = failure.total,
                address = %candidate.address,
                error = %failure.source,
                "connect failed, trying next candidate"
            ),
        }
    }
}
