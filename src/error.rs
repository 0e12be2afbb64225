//! Error types

use crate::resolve::{AddressFamily, SocketKind, TransportProtocol};
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers
///
/// A failed connect call yields exactly one of these, describing the last
/// candidate tried. Failures of earlier candidates are only reported through
/// the diagnostic sink.
#[derive(Debug, Error)]
pub enum Error {
    /// Host/port could not be turned into any candidate
    #[error("failed to resolve {host}:{port}: {source}")]
    Resolution {
        /// Host that was looked up
        host: String,
        /// Port or service name that was looked up
        port: String,
        /// Underlying resolver error
        #[source]
        source: io::Error,
    },

    /// The final candidate's socket could not be created
    #[error("socket({family}, {socket_type}, {protocol}) failed: {source}")]
    SocketCreation {
        /// Requested family
        family: AddressFamily,
        /// Requested socket type
        socket_type: SocketKind,
        /// Requested protocol
        protocol: TransportProtocol,
        /// OS error
        #[source]
        source: io::Error,
    },

    /// The final candidate's connect failed
    #[error("connect to {address} failed: {source}")]
    Connect {
        /// Address that was attempted
        address: SocketAddr,
        /// OS error
        #[source]
        source: io::Error,
    },

    /// Invalid caller input
    #[error("configuration error: {0}")]
    Config(String),

    /// Connector reached a state that should be impossible
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Short static label, used for metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Resolution { .. } => "resolution",
            Error::SocketCreation { .. } => "socket_creation",
            Error::Connect { .. } => "connect",
            Error::Config(_) => "config",
            Error::Internal(_) => "internal",
        }
    }

    /// Whether calling again later might succeed
    ///
    /// Connect failures are usually transient (refused, unreachable, timed
    /// out). Resolution failures are retriable unless the name is unknown,
    /// which the resolver reports as `NotFound`. Bad input and internal
    /// defects are not retriable.
    pub fn is_retriable(&self) -> bool {
        match self {
            Error::Resolution { source, .. } => source.kind() != io::ErrorKind::NotFound,
            Error::Connect { .. } => true,
            Error::SocketCreation { source, .. } => source.kind() == io::ErrorKind::OutOfMemory,
            Error::Config(_) | Error::Internal(_) => false,
        }
    }

    /// Underlying I/O error, if any
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Error::Resolution { source, .. }
            | Error::SocketCreation { source, .. }
            | Error::Connect { source, .. } => Some(source),
            Error::Config(_) | Error::Internal(_) => None,
        }
    }
}
