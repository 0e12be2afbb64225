//! Service name lookup (`/etc/services`)
//!
//! Entries have the form `name port/protocol [aliases...] [# comment]`.
//! Only `tcp` entries are considered.

use std::path::Path;

/// Default location of the services database
pub const SERVICES_PATH: &str = "/etc/services";

// Used when the services database is missing or has no entry
const WELL_KNOWN_TCP: &[(&str, u16)] = &[
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("domain", 53),
    ("http", 80),
    ("www", 80),
    ("pop3", 110),
    ("imap", 143),
    ("https", 443),
    ("submission", 587),
    ("imaps", 993),
    ("pop3s", 995),
    ("postgresql", 5432),
];

/// Find the TCP port for `name` in services-database text.
///
/// Matches the canonical name and aliases, case-sensitively. The first
/// matching line wins.
pub fn lookup_in(contents: &str, name: &str) -> Option<u16> {
    for line in contents.lines() {
        let line = match line.split_once('#') {
            Some((data, _comment)) => data,
            None => line,
        };
        let mut fields = line.split_whitespace();
        let (Some(canonical), Some(port_proto)) = (fields.next(), fields.next()) else {
            continue;
        };
        let Some((port, proto)) = port_proto.split_once('/') else {
            continue;
        };
        if proto != "tcp" {
            continue;
        }
        if canonical == name || fields.any(|alias| alias == name) {
            if let Ok(port) = port.parse::<u16>() {
                return Some(port);
            }
        }
    }
    None
}

/// Look up a TCP service by name.
///
/// Reads the services database at `path`, then falls back to a small table
/// of well-known services.
pub fn lookup_tcp_service(path: &Path, name: &str) -> Option<u16> {
    if let Ok(contents) = std::fs::read_to_string(path) {
        if let Some(port) = lookup_in(&contents, name) {
            return Some(port);
        }
    } else {
        tracing::trace!(path = %path.display(), "services database unreadable");
    }

    WELL_KNOWN_TCP
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, port)| *port)
}
