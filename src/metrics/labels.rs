//! Metric names and label values

/// Attempts started, one per candidate tried
pub const ATTEMPTS_TOTAL: &str = "inet_connect_attempts_total";
/// Intermediate failures swallowed in favour of the next candidate
pub const FALLBACKS_TOTAL: &str = "inet_connect_fallbacks_total";
/// Connections handed to callers
pub const CONNECTIONS_ESTABLISHED_TOTAL: &str = "inet_connect_connections_established_total";
/// Calls that ended in an error
pub const ERRORS_TOTAL: &str = "inet_connect_errors_total";
/// Wall time of a single connect attempt
pub const ATTEMPT_DURATION_MS: &str = "inet_connect_attempt_duration_ms";

pub const STAGE_CREATE: &str = "create";
pub const STAGE_CONNECT: &str = "connect";

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERROR: &str = "error";
