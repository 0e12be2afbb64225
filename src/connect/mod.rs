//! Connection establishment
//!
//! This module handles:
//! * Ordered, sequential fallback across resolved candidates
//! * Socket creation and connect through a replaceable factory
//! * Diagnostics for failures that were recovered by falling back
//! * A tokio variant with identical ordering semantics

mod async_connector;
mod attempt;
mod config;
mod connector;
mod sink;
mod socket;

pub use async_connector::AsyncConnector;
pub use attempt::{AttemptFailure, AttemptStage};
pub use config::{ConnectorConfig, ConnectorConfigBuilder};
pub use connector::Connector;
pub use sink::{DiagnosticSink, TracingSink};
pub use socket::{SocketFactory, SystemSockets};

use crate::resolve::{ConnectionCandidate, Port};
use crate::Result;
use std::net::TcpStream;

/// Resolve `host`/`port` and connect with the default [`Connector`]
///
/// # Examples
///
/// ```no_run
/// let stream = inet_connect::connect_tcp("example.com", "https")?;
/// println!("connected to {}", stream.peer_addr()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn connect_tcp(host: &str, port: impl Into<Port>) -> Result<TcpStream> {
    Connector::new().connect_tcp(host, port).map(TcpStream::from)
}

/// Connect to the first reachable candidate with the default [`Connector`]
///
/// Returns `Ok(None)` when `candidates` is empty.
pub fn connect_candidates(candidates: &[ConnectionCandidate]) -> Result<Option<TcpStream>> {
    Connector::new()
        .connect_candidates(candidates)
        .map(|socket| socket.map(TcpStream::from))
}
