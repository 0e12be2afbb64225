//! Socket creation and connect, behind a seam
//!
//! The connector only needs two operations per candidate: create a socket for
//! the candidate's family/type/protocol, then connect it. [`SocketFactory`]
//! exposes exactly that, so the fallback logic can run against scripted
//! sockets in tests. Dropping a socket closes it.

use super::config::ConnectorConfig;
use crate::resolve::{AddressFamily, ConnectionCandidate};
use socket2::{Domain, Protocol, SockAddr, SockRef, Socket, TcpKeepalive, Type};
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Creates and connects sockets for candidates
pub trait SocketFactory {
    /// Socket handle; closed on drop
    type Socket;

    /// Create an unconnected socket for the candidate
    fn create(&self, candidate: &ConnectionCandidate) -> io::Result<Self::Socket>;

    /// Connect `socket` to `address`, blocking for at most `timeout` if given
    fn connect(
        &self,
        socket: &Self::Socket,
        address: &SocketAddr,
        timeout: Option<Duration>,
    ) -> io::Result<()>;

    /// Apply post-connect options to a socket about to be returned
    fn configure(&self, _socket: &Self::Socket, _config: &ConnectorConfig) -> io::Result<()> {
        Ok(())
    }
}

/// OS sockets via `socket2`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSockets;

impl SocketFactory for SystemSockets {
    type Socket = Socket;

    fn create(&self, candidate: &ConnectionCandidate) -> io::Result<Socket> {
        ensure_tcp_stream(candidate)?;
        let domain = match candidate.family {
            AddressFamily::Inet => Domain::IPV4,
            AddressFamily::Inet6 => Domain::IPV6,
        };
        Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
    }

    fn connect(
        &self,
        socket: &Socket,
        address: &SocketAddr,
        timeout: Option<Duration>,
    ) -> io::Result<()> {
        let address = SockAddr::from(*address);
        match timeout {
            Some(timeout) => socket.connect_timeout(&address, timeout),
            None => socket.connect(&address),
        }
    }

    fn configure(&self, socket: &Socket, config: &ConnectorConfig) -> io::Result<()> {
        apply_stream_options(SockRef::from(socket), config)
    }
}

/// Reject candidates that cannot yield a TCP connection
///
/// A datagram socket "connects" without a handshake, so it must fail at
/// creation and fall back like any other unusable candidate.
pub(crate) fn ensure_tcp_stream(candidate: &ConnectionCandidate) -> io::Result<()> {
    if candidate.is_tcp_stream() {
        return Ok(());
    }
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!(
            "only TCP streams are supported, got {}/{}",
            candidate.socket_type, candidate.protocol
        ),
    ))
}

/// Set TCP_NODELAY and keepalive as configured
pub(crate) fn apply_stream_options(socket: SockRef<'_>, config: &ConnectorConfig) -> io::Result<()> {
    if config.nodelay {
        socket.set_nodelay(true)?;
    }
    if let Some(idle) = config.keepalive {
        socket.set_tcp_keepalive(&TcpKeepalive::new().with_time(idle))?;
    }
    Ok(())
}
