//! Connection candidates produced by address resolution

use std::net::SocketAddr;

/// Address family of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4 (`AF_INET`)
    Inet,
    /// IPv6 (`AF_INET6`)
    Inet6,
}

impl AddressFamily {
    /// Family matching a socket address
    pub fn of(address: &SocketAddr) -> Self {
        match address {
            SocketAddr::V4(_) => Self::Inet,
            SocketAddr::V6(_) => Self::Inet6,
        }
    }
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inet => write!(f, "AF_INET"),
            Self::Inet6 => write!(f, "AF_INET6"),
        }
    }
}

/// Kind of socket to create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SocketKind {
    /// Connection-oriented byte stream (`SOCK_STREAM`)
    #[default]
    Stream,
    /// Datagrams (`SOCK_DGRAM`)
    Datagram,
}

impl std::fmt::Display for SocketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stream => write!(f, "SOCK_STREAM"),
            Self::Datagram => write!(f, "SOCK_DGRAM"),
        }
    }
}

/// Transport protocol of a candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    /// `IPPROTO_TCP`
    #[default]
    Tcp,
    /// `IPPROTO_UDP`
    Udp,
}

impl std::fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp => write!(f, "IPPROTO_TCP"),
            Self::Udp => write!(f, "IPPROTO_UDP"),
        }
    }
}

/// One concrete target for a connection attempt
///
/// The connector trusts that `address` is a legal target for the
/// family, socket type and protocol. Keeping them consistent is the
/// resolver's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionCandidate {
    /// Address family
    pub family: AddressFamily,
    /// Socket type
    pub socket_type: SocketKind,
    /// Transport protocol
    pub protocol: TransportProtocol,
    /// Connect target
    pub address: SocketAddr,
}

impl ConnectionCandidate {
    /// TCP stream candidate for an address, family derived from the address
    pub fn tcp(address: SocketAddr) -> Self {
        Self {
            family: AddressFamily::of(&address),
            socket_type: SocketKind::Stream,
            protocol: TransportProtocol::Tcp,
            address,
        }
    }

    /// Whether this candidate describes a TCP stream
    pub fn is_tcp_stream(&self) -> bool {
        self.socket_type == SocketKind::Stream && self.protocol == TransportProtocol::Tcp
    }
}

impl std::fmt::Display for ConnectionCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.family, self.socket_type, self.protocol, self.address
        )
    }
}

/// Ordered candidates, in attempt order
///
/// Order is the resolver's preference order. Nothing downstream reorders or
/// deduplicates it.
pub type CandidateList = Vec<ConnectionCandidate>;
