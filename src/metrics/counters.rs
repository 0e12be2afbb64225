//! Counter helpers

use super::labels;
use crate::resolve::AddressFamily;

fn family_label(family: AddressFamily) -> &'static str {
    match family {
        AddressFamily::Inet => "inet",
        AddressFamily::Inet6 => "inet6",
    }
}

/// A candidate attempt started
pub fn attempt_started(family: AddressFamily) {
    metrics::counter!(labels::ATTEMPTS_TOTAL, "family" => family_label(family)).increment(1);
}

/// An intermediate failure was logged and the next candidate will be tried
pub fn fallback(stage: &'static str, family: AddressFamily) {
    metrics::counter!(
        labels::FALLBACKS_TOTAL,
        "stage" => stage,
        "family" => family_label(family)
    )
    .increment(1);
}

/// A connected socket was returned
pub fn connection_established(family: AddressFamily) {
    metrics::counter!(
        labels::CONNECTIONS_ESTABLISHED_TOTAL,
        "family" => family_label(family)
    )
    .increment(1);
}

/// A connect call failed as a whole
pub fn connect_error(category: &'static str) {
    metrics::counter!(labels::ERRORS_TOTAL, "category" => category).increment(1);
}
