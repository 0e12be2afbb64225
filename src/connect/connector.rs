//! Sequential connector
//!
//! Tries candidates strictly in order, one at a time. The first candidate
//! whose socket is created and connected wins; nothing after it is touched.
//! Failures of candidates that have a successor go to the diagnostic sink.
//! Only the last candidate's failure is returned to the caller.

use super::attempt::{AttemptFailure, AttemptOutcome, AttemptStage};
use super::config::ConnectorConfig;
use super::sink::{DiagnosticSink, TracingSink};
use super::socket::{SocketFactory, SystemSockets};
use crate::metrics::{counters, histograms, labels};
use crate::resolve::{ConnectionCandidate, Port, Resolve, SystemResolver};
use crate::{Error, Result};
use std::io;
use std::time::Instant;

/// Blocking connector with ordered fallback
///
/// Generic over the resolver, the socket factory and the diagnostic sink.
/// The defaults use the system resolver, OS sockets and `tracing`.
///
/// # Examples
///
/// ```no_run
/// use inet_connect::connect::Connector;
///
/// let connector = Connector::new();
/// let stream: std::net::TcpStream = connector.connect_tcp("example.com", 80u16)?.into();
/// # Ok::<(), inet_connect::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Connector<R = SystemResolver, F = SystemSockets, S = TracingSink> {
    config: ConnectorConfig,
    resolver: R,
    sockets: F,
    sink: S,
}

impl Connector {
    /// Connector with default configuration and collaborators
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector with the given configuration and default collaborators
    pub fn with_config(config: ConnectorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

impl<R, F, S> Connector<R, F, S> {
    /// Replace the resolver
    pub fn resolver<R2>(self, resolver: R2) -> Connector<R2, F, S> {
        Connector {
            config: self.config,
            resolver,
            sockets: self.sockets,
            sink: self.sink,
        }
    }

    /// Replace the socket factory
    pub fn socket_factory<F2>(self, sockets: F2) -> Connector<R, F2, S> {
        Connector {
            config: self.config,
            resolver: self.resolver,
            sockets,
            sink: self.sink,
        }
    }

    /// Replace the diagnostic sink
    pub fn sink<S2>(self, sink: S2) -> Connector<R, F, S2> {
        Connector {
            config: self.config,
            resolver: self.resolver,
            sockets: self.sockets,
            sink,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }
}

impl<R, F, S> Connector<R, F, S>
where
    R: Resolve,
    F: SocketFactory,
    S: DiagnosticSink,
{
    /// Resolve `host`/`port` and connect to the first reachable candidate
    ///
    /// Resolution errors are returned unchanged and no socket is created.
    pub fn connect_tcp(&self, host: &str, port: impl Into<Port>) -> Result<F::Socket> {
        let port = port.into();
        let candidates = self.resolver.resolve(host, &port).map_err(|e| {
            counters::connect_error(e.category());
            e
        })?;

        match self.connect_candidates(&candidates)? {
            Some(socket) => Ok(socket),
            None => {
                let err = Error::Resolution {
                    host: host.to_string(),
                    port: port.to_string(),
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        "resolver returned no candidates",
                    ),
                };
                counters::connect_error(err.category());
                Err(err)
            }
        }
    }

    /// Connect to the first candidate, in list order, that accepts
    ///
    /// Returns `Ok(None)` for an empty list. Otherwise returns the first
    /// connected socket, or the error of the last candidate if all fail.
    pub fn connect_candidates(
        &self,
        candidates: &[ConnectionCandidate],
    ) -> Result<Option<F::Socket>> {
        if candidates.is_empty() {
            tracing::trace!("no candidates to connect to");
            return Ok(None);
        }

        let total = candidates.len();
        let _span = tracing::debug_span!("connect_candidates", candidates = total).entered();

        // Held back until we know whether another candidate follows
        let mut pending: Option<AttemptFailure> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            if let Some(failure) = pending.take() {
                self.fall_back(&failure);
            }
            match self.attempt(candidate, index + 1, total) {
                AttemptOutcome::Connected(socket) => return Ok(Some(socket)),
                AttemptOutcome::Failed(failure) => pending = Some(failure),
            }
        }

        let err = match pending {
            Some(failure) => Error::from(failure),
            None => Error::Internal(format!(
                "connect loop ended without connecting or failing; candidates: {:?}",
                candidates
            )),
        };
        counters::connect_error(err.category());
        Err(err)
    }

    fn attempt(
        &self,
        candidate: &ConnectionCandidate,
        position: usize,
        total: usize,
    ) -> AttemptOutcome<F::Socket> {
        counters::attempt_started(candidate.family);
        let started = Instant::now();

        let socket = match self.sockets.create(candidate) {
            Ok(socket) => socket,
            Err(source) => {
                histograms::attempt_duration(labels::OUTCOME_ERROR, started.elapsed());
                return AttemptOutcome::Failed(AttemptFailure {
                    candidate: *candidate,
                    position,
                    total,
                    stage: AttemptStage::Create,
                    source,
                });
            }
        };

        if let Err(source) =
            self.sockets
                .connect(&socket, &candidate.address, self.config.attempt_timeout())
        {
            drop(socket);
            histograms::attempt_duration(labels::OUTCOME_ERROR, started.elapsed());
            return AttemptOutcome::Failed(AttemptFailure {
                candidate: *candidate,
                position,
                total,
                stage: AttemptStage::Connect,
                source,
            });
        }

        histograms::attempt_duration(labels::OUTCOME_OK, started.elapsed());

        if self.config.has_stream_options() {
            if let Err(e) = self.sockets.configure(&socket, &self.config) {
                tracing::warn!(address = %candidate.address, error = %e, "failed to apply socket options");
            }
        }

        tracing::debug!(address = %candidate.address, position, total, "connected");
        counters::connection_established(candidate.family);
        AttemptOutcome::Connected(socket)
    }

    fn fall_back(&self, failure: &AttemptFailure) {
        counters::fallback(failure.stage.label(), failure.candidate.family);
        self.sink.attempt_failed(failure);
    }
}
