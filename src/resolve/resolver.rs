//! Resolver adapter over the system name resolution facility

use super::candidate::{CandidateList, ConnectionCandidate};
use super::port::Port;
use super::services::{lookup_tcp_service, SERVICES_PATH};
use crate::{Error, Result};
use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

/// Turns a host and port into ordered connection candidates
///
/// Implementations must return candidates in preference order and fail with
/// [`Error::Resolution`] when nothing can be produced.
pub trait Resolve: Send + Sync {
    /// Resolve `host`/`port` into TCP stream candidates
    fn resolve(&self, host: &str, port: &Port) -> Result<CandidateList>;
}

impl<R: Resolve + ?Sized> Resolve for &R {
    fn resolve(&self, host: &str, port: &Port) -> Result<CandidateList> {
        (**self).resolve(host, port)
    }
}

impl<R: Resolve + ?Sized> Resolve for std::sync::Arc<R> {
    fn resolve(&self, host: &str, port: &Port) -> Result<CandidateList> {
        (**self).resolve(host, port)
    }
}

/// Resolver backed by the platform `getaddrinfo`
///
/// Literal IP addresses skip the lookup. Ordering follows the system's
/// address selection policy (`/etc/gai.conf` on glibc).
#[derive(Debug, Clone)]
pub struct SystemResolver {
    services_path: PathBuf,
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self {
            services_path: PathBuf::from(SERVICES_PATH),
        }
    }
}

impl SystemResolver {
    /// Create a resolver using the default services database
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different services database for service-name ports
    pub fn with_services_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.services_path = path.into();
        self
    }

    fn port_number(&self, host: &str, port: &Port) -> Result<u16> {
        // Service names built through `From<&str>` are only checked here
        let port = match port {
            Port::Service(name) => name.parse::<Port>()?,
            Port::Number(_) => port.clone(),
        };
        port.number_with(|name| lookup_tcp_service(&self.services_path, name))
            .ok_or_else(|| Error::Resolution {
                host: host.to_string(),
                port: port.to_string(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unknown tcp service '{}'", port),
                ),
            })
    }
}

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str, port: &Port) -> Result<CandidateList> {
        if host.is_empty() {
            return Err(Error::Config("host must not be empty".into()));
        }
        let number = self.port_number(host, port)?;

        // Bracketed IPv6 literals are accepted as well as bare ones
        let literal = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        if let Ok(ip) = literal.parse::<IpAddr>() {
            return Ok(vec![ConnectionCandidate::tcp(SocketAddr::new(ip, number))]);
        }

        let addrs = (host, number)
            .to_socket_addrs()
            .map_err(|source| Error::Resolution {
                host: host.to_string(),
                port: port.to_string(),
                source: classify_lookup_error(source),
            })?;
        let candidates: CandidateList = addrs.map(ConnectionCandidate::tcp).collect();

        if candidates.is_empty() {
            return Err(Error::Resolution {
                host: host.to_string(),
                port: port.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses resolved"),
            });
        }

        tracing::debug!(
            host,
            port = %port,
            candidates = candidates.len(),
            "resolved host"
        );
        Ok(candidates)
    }
}

/// Give a lookup failure a kind that tells whether retrying can help
///
/// `getaddrinfo` errors come back without a usable `ErrorKind`. A temporary
/// resolver failure (`EAI_AGAIN`) becomes `TimedOut`, anything else means the
/// name does not resolve and becomes `NotFound`. The message is kept.
fn classify_lookup_error(source: io::Error) -> io::Error {
    match source.kind() {
        io::ErrorKind::NotFound
        | io::ErrorKind::TimedOut
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock => source,
        _ => {
            let message = source.to_string().to_ascii_lowercase();
            let kind = if message.contains("temporary") || message.contains("try again") {
                io::ErrorKind::TimedOut
            } else {
                io::ErrorKind::NotFound
            };
            io::Error::new(kind, source)
        }
    }
}

/// Resolve with the default [`SystemResolver`]
pub fn resolve(host: &str, port: impl Into<Port>) -> Result<CandidateList> {
    SystemResolver::default().resolve(host, &port.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::AddressFamily;

    #[test]
    fn test_ipv4_literal_fast_path() {
        let candidates = resolve("127.0.0.1", 8080u16).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].address, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(candidates[0].family, AddressFamily::Inet);
        assert!(candidates[0].is_tcp_stream());
    }

    #[test]
    fn test_ipv6_literal_with_and_without_brackets() {
        let bare = resolve("::1", 443u16).unwrap();
        let bracketed = resolve("[::1]", 443u16).unwrap();
        assert_eq!(bare, bracketed);
        assert_eq!(bare[0].family, AddressFamily::Inet6);
    }

    #[test]
    fn test_service_name_port() {
        let resolver = SystemResolver::new().with_services_path("/nonexistent/services");
        let candidates = resolver
            .resolve("127.0.0.1", &Port::Service("https".into()))
            .unwrap();
        assert_eq!(candidates[0].address.port(), 443);
    }

    #[test]
    fn test_unknown_service_is_resolution_error() {
        let resolver = SystemResolver::new().with_services_path("/nonexistent/services");
        let err = resolver
            .resolve("127.0.0.1", &Port::Service("no-such-service".into()))
            .unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
    }

    #[test]
    fn test_empty_host_rejected() {
        let err = resolve("", 80u16).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unresolvable_host() {
        // .invalid is reserved and never resolves (RFC 2606)
        let err = resolve("nonexistent.invalid", 80u16).unwrap_err();
        assert!(matches!(err, Error::Resolution { .. }));
        assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::NotFound));
        assert!(!err.is_retriable());
        assert!(err.to_string().contains("nonexistent.invalid:80"));
    }

    #[test]
    fn test_lookup_error_classification() {
        let err = classify_lookup_error(io::Error::new(
            io::ErrorKind::Other,
            "failed to lookup address information: Name or service not known",
        ));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("Name or service not known"));

        let err = classify_lookup_error(io::Error::new(
            io::ErrorKind::Other,
            "failed to lookup address information: Temporary failure in name resolution",
        ));
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);

        let err = classify_lookup_error(io::Error::from(io::ErrorKind::Interrupted));
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }

    #[test]
    fn test_temporary_lookup_failure_is_retriable() {
        let err = Error::Resolution {
            host: "db.internal".into(),
            port: "5432".into(),
            source: classify_lookup_error(io::Error::new(
                io::ErrorKind::Other,
                "failed to lookup address information: Temporary failure in name resolution",
            )),
        };
        assert!(err.is_retriable());
    }

    #[test]
    fn test_invalid_service_name_rejected() {
        let resolver = SystemResolver::new().with_services_path("/nonexistent/services");

        let err = resolver.resolve("127.0.0.1", &Port::from("70000")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = resolver.resolve("127.0.0.1", &Port::from("")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = resolver
            .resolve("127.0.0.1", &Port::Service("my service".into()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_localhost_resolves_to_loopback() {
        let candidates = resolve("localhost", 80u16).unwrap();
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|c| c.address.ip().is_loopback()));
    }
}
