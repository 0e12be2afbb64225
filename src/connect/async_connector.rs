//! Async variant of the sequential connector
//!
//! Same contract as [`Connector`](super::Connector): candidates are awaited
//! one after another in list order, the first success wins and only the last
//! failure is returned. No attempt is ever started before the previous one
//! has finished and its socket has been closed.

use super::attempt::{AttemptFailure, AttemptOutcome, AttemptStage};
use super::config::ConnectorConfig;
use super::sink::{DiagnosticSink, TracingSink};
use super::socket::{apply_stream_options, ensure_tcp_stream};
use crate::metrics::{counters, histograms, labels};
use crate::resolve::{AddressFamily, ConnectionCandidate, Port, Resolve, SystemResolver};
use crate::{Error, Result};
use socket2::SockRef;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::{TcpSocket, TcpStream};
use tracing::Instrument;

/// Tokio connector with ordered fallback
///
/// Resolution runs the resolver on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct AsyncConnector<R = SystemResolver, S = TracingSink> {
    config: ConnectorConfig,
    resolver: Arc<R>,
    sink: S,
}

impl Default for AsyncConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncConnector {
    /// Connector with default configuration and collaborators
    pub fn new() -> Self {
        Self::with_config(ConnectorConfig::default())
    }

    /// Connector with the given configuration and default collaborators
    pub fn with_config(config: ConnectorConfig) -> Self {
        Self {
            config,
            resolver: Arc::new(SystemResolver::default()),
            sink: TracingSink,
        }
    }
}

impl<R, S> AsyncConnector<R, S> {
    /// Replace the resolver
    pub fn resolver<R2>(self, resolver: R2) -> AsyncConnector<R2, S> {
        AsyncConnector {
            config: self.config,
            resolver: Arc::new(resolver),
            sink: self.sink,
        }
    }

    /// Replace the diagnostic sink
    pub fn sink<S2>(self, sink: S2) -> AsyncConnector<R, S2> {
        AsyncConnector {
            config: self.config,
            resolver: self.resolver,
            sink,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }
}

impl<R, S> AsyncConnector<R, S>
where
    R: Resolve + 'static,
    S: DiagnosticSink,
{
    /// Resolve `host`/`port` and connect to the first reachable candidate
    pub async fn connect_tcp(&self, host: &str, port: impl Into<Port>) -> Result<TcpStream> {
        let port = port.into();
        let resolver = Arc::clone(&self.resolver);
        let (lookup_host, lookup_port) = (host.to_string(), port.clone());

        let candidates = tokio::task::spawn_blocking(move || {
            resolver.resolve(&lookup_host, &lookup_port)
        })
        .await
        .map_err(|e| Error::Internal(format!("resolver task failed: {}", e)))
        .and_then(|resolved| resolved)
        .map_err(|e| {
            counters::connect_error(e.category());
            e
        })?;

        match self.connect_candidates(&candidates).await? {
            Some(stream) => Ok(stream),
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
    /// Returns `Ok(None)` for an empty list.
    pub async fn connect_candidates(
        &self,
        candidates: &[ConnectionCandidate],
    ) -> Result<Option<TcpStream>> {
        if candidates.is_empty() {
            tracing::trace!("no candidates to connect to");
            return Ok(None);
        }

        let total = candidates.len();
        async {
            let mut pending: Option<AttemptFailure> = None;

            for (index, candidate) in candidates.iter().enumerate() {
                if let Some(failure) = pending.take() {
                    counters::fallback(failure.stage.label(), failure.candidate.family);
                    self.sink.attempt_failed(&failure);
                }
                match self.attempt(candidate, index + 1, total).await {
                    AttemptOutcome::Connected(stream) => return Ok(Some(stream)),
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
        .instrument(tracing::debug_span!("connect_candidates", candidates = total))
        .await
    }

    async fn attempt(
        &self,
        candidate: &ConnectionCandidate,
        position: usize,
        total: usize,
    ) -> AttemptOutcome<TcpStream> {
        counters::attempt_started(candidate.family);
        let started = Instant::now();
        let failed = |stage, source| {
            histograms::attempt_duration(labels::OUTCOME_ERROR, started.elapsed());
            AttemptOutcome::Failed(AttemptFailure {
                candidate: *candidate,
                position,
                total,
                stage,
                source,
            })
        };

        let socket = match create_socket(candidate) {
            Ok(socket) => socket,
            Err(source) => return failed(AttemptStage::Create, source),
        };

        // TcpSocket::connect consumes the socket; on error it is dropped (closed)
        let connect = socket.connect(candidate.address);
        let connected = match self.config.attempt_timeout() {
            Some(timeout) => match tokio::time::timeout(timeout, connect).await {
                Ok(result) => result,
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("connect timed out after {:?}", timeout),
                )),
            },
            None => connect.await,
        };
        let stream = match connected {
            Ok(stream) => stream,
            Err(source) => return failed(AttemptStage::Connect, source),
        };

        histograms::attempt_duration(labels::OUTCOME_OK, started.elapsed());

        if self.config.has_stream_options() {
            if let Err(e) = apply_stream_options(SockRef::from(&stream), &self.config) {
                tracing::warn!(address = %candidate.address, error = %e, "failed to apply socket options");
            }
        }

        tracing::debug!(address = %candidate.address, position, total, "connected");
        counters::connection_established(candidate.family);
        AttemptOutcome::Connected(stream)
    }
}

fn create_socket(candidate: &ConnectionCandidate) -> io::Result<TcpSocket> {
    ensure_tcp_stream(candidate)?;
    match candidate.family {
        AddressFamily::Inet => TcpSocket::new_v4(),
        AddressFamily::Inet6 => TcpSocket::new_v6(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{CandidateList, SocketKind, TransportProtocol};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<AttemptStage>>,
    }

    impl DiagnosticSink for RecordingSink {
        fn attempt_failed(&self, failure: &AttemptFailure) {
            self.events.lock().unwrap().push(failure.stage);
        }
    }

    struct FailingResolver;

    impl Resolve for FailingResolver {
        fn resolve(&self, host: &str, port: &Port) -> Result<CandidateList> {
            Err(Error::Resolution {
                host: host.to_string(),
                port: port.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "Name or service not known"),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_none() {
        let sink = RecordingSink::default();
        let connector = AsyncConnector::new().sink(&sink);

        assert!(connector.connect_candidates(&[]).await.unwrap().is_none());
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_datagram_candidate_is_creation_failure() {
        let sink = RecordingSink::default();
        let connector = AsyncConnector::new().sink(&sink);
        let candidate = ConnectionCandidate {
            socket_type: SocketKind::Datagram,
            protocol: TransportProtocol::Udp,
            ..ConnectionCandidate::tcp("127.0.0.1:53".parse().unwrap())
        };

        let err = connector.connect_candidates(&[candidate]).await.unwrap_err();

        assert!(matches!(err, Error::SocketCreation { .. }));
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolution_failure_propagates() {
        let connector = AsyncConnector::new().resolver(FailingResolver);

        let err = connector.connect_tcp("example.test", 443u16).await.unwrap_err();

        assert!(matches!(err, Error::Resolution { .. }));
    }
}
