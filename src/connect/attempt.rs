//! Outcome of a single candidate attempt

use crate::metrics::labels;
use crate::resolve::ConnectionCandidate;
use crate::Error;
use std::io;

/// Step of an attempt that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStage {
    /// Creating the socket for the candidate's family/type/protocol
    Create,
    /// Connecting the socket to the candidate's address
    Connect,
}

impl AttemptStage {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Create => labels::STAGE_CREATE,
            Self::Connect => labels::STAGE_CONNECT,
        }
    }
}

impl std::fmt::Display for AttemptStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed attempt on one candidate
///
/// Handed to the diagnostic sink when another candidate follows, or turned
/// into the caller's [`Error`] when it was the last one.
#[derive(Debug)]
pub struct AttemptFailure {
    /// Candidate that was tried
    pub candidate: ConnectionCandidate,
    /// 1-based position of the candidate in the list
    pub position: usize,
    /// Number of candidates in the list
    pub total: usize,
    /// Step that failed
    pub stage: AttemptStage,
    /// OS error
    pub source: io::Error,
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            AttemptStage::Create => write!(
                f,
                "socket({}, {}, {}) failed",
                self.candidate.family, self.candidate.socket_type, self.candidate.protocol
            )?,
            AttemptStage::Connect => write!(f, "connect({}) failed", self.candidate.address)?,
        }
        write!(f, " [{}/{}]: {}", self.position, self.total, self.source)
    }
}

impl From<AttemptFailure> for Error {
    fn from(failure: AttemptFailure) -> Self {
        let candidate = failure.candidate;
        match failure.stage {
            AttemptStage::Create => Error::SocketCreation {
                family: candidate.family,
                socket_type: candidate.socket_type,
                protocol: candidate.protocol,
                source: failure.source,
            },
            AttemptStage::Connect => Error::Connect {
                address: candidate.address,
                source: failure.source,
            },
        }
    }
}

/// Result of trying one candidate
#[derive(Debug)]
pub(crate) enum AttemptOutcome<S> {
    Connected(S),
    Failed(AttemptFailure),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::AddressFamily;

    fn failure(stage: AttemptStage) -> AttemptFailure {
        AttemptFailure {
            candidate: ConnectionCandidate::tcp("[2001:db8::1]:443".parse().unwrap()),
            position: 1,
            total: 2,
            stage,
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        }
    }

    #[test]
    fn test_create_failure_becomes_socket_creation_error() {
        let err = Error::from(failure(AttemptStage::Create));
        match err {
            Error::SocketCreation { family, source, .. } => {
                assert_eq!(family, AddressFamily::Inet6);
                assert_eq!(source.kind(), io::ErrorKind::ConnectionRefused);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_connect_failure_becomes_connect_error() {
        let err = Error::from(failure(AttemptStage::Connect));
        match err {
            Error::Connect { address, .. } => {
                assert_eq!(address.to_string(), "[2001:db8::1]:443");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_failure_display() {
        let msg = failure(AttemptStage::Connect).to_string();
        assert!(msg.starts_with("connect([2001:db8::1]:443) failed [1/2]"));

        let msg = failure(AttemptStage::Create).to_string();
        assert!(msg.starts_with("socket(AF_INET6, SOCK_STREAM, IPPROTO_TCP) failed"));
    }
}
