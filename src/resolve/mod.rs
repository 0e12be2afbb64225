//! Address resolution
//!
//! This module handles:
//! * Candidate model (family, socket type, protocol, address)
//! * Port numbers and service names
//! * The resolver seam and its system implementation

mod candidate;
mod port;
mod resolver;
pub mod services;

pub use candidate::{
    AddressFamily, CandidateList, ConnectionCandidate, SocketKind, TransportProtocol,
};
pub use port::Port;
pub use resolver::{resolve, Resolve, SystemResolver};
