//! inet-connect: TCP connect with ordered address fallback
//!
//! Resolves a host into candidate addresses and connects to them one at a
//! time, in the resolver's preference order, until one accepts. Typical use
//! is IPv6-then-IPv4 fallback for dual-stack hosts.
//!
//! Attempts are strictly sequential. A caller sees at most one error, the one
//! from the last candidate tried; earlier failures are reported to a
//! [`DiagnosticSink`](connect::DiagnosticSink), which logs through `tracing`
//! by default.
//!
//! # Examples
//!
//! ```no_run
//! use inet_connect::connect::{Connector, ConnectorConfig};
//! use std::time::Duration;
//!
//! let config = ConnectorConfig::builder()
//!     .connect_timeout(Duration::from_secs(3))
//!     .nodelay(true)
//!     .build();
//! let socket = Connector::with_config(config).connect_tcp("example.com", 443u16)?;
//! # Ok::<(), inet_connect::Error>(())
//! ```

pub mod connect;
pub mod error;
pub mod metrics;
pub mod resolve;

pub use connect::{connect_candidates, connect_tcp, AsyncConnector, Connector};
pub use error::{Error, Result};
pub use resolve::{resolve, ConnectionCandidate, Port};
