//! Port specification: number or service name

use crate::Error;

/// Port to connect to, as a number or a service name (`"https"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Port {
    /// Numeric port
    Number(u16),
    /// Service name, looked up in the services database
    Service(String),
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Number(port)
    }
}

/// Lenient conversion: digits that fit in `u16` become a number, anything
/// else a service name. Use `str::parse` to reject bad input up front; the
/// resolver applies the same checks to service names before looking them up.
impl From<&str> for Port {
    fn from(s: &str) -> Self {
        match s.parse::<u16>() {
            Ok(port) => Self::Number(port),
            Err(_) => Self::Service(s.to_string()),
        }
    }
}

impl std::str::FromStr for Port {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::Config("port must not be empty".into()));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u16>()
                .map(Self::Number)
                .map_err(|_| Error::Config(format!("port '{}' out of range", s)));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!("invalid service name '{}'", s)));
        }
        Ok(Self::Service(s.to_string()))
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(port) => write!(f, "{}", port),
            Self::Service(name) => write!(f, "{}", name),
        }
    }
}

impl Port {
    /// Numeric value, looking up service names with `lookup`
    pub(crate) fn number_with(&self, lookup: impl FnOnce(&str) -> Option<u16>) -> Option<u16> {
        match self {
            Self::Number(port) => Some(*port),
            Self::Service(name) => lookup(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_port() {
        assert_eq!("443".parse::<Port>().unwrap(), Port::Number(443));
        assert_eq!("0".parse::<Port>().unwrap(), Port::Number(0));
    }

    #[test]
    fn test_parse_service_name() {
        assert_eq!(
            "https".parse::<Port>().unwrap(),
            Port::Service("https".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!("".parse::<Port>().is_err());
        assert!("70000".parse::<Port>().is_err());
        assert!("my service".parse::<Port>().is_err());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Port::from(80u16), Port::Number(80));
        assert_eq!(Port::from("8080"), Port::Number(8080));
        assert_eq!(Port::from("http"), Port::Service("http".into()));
    }

    #[test]
    fn test_number_with_lookup() {
        assert_eq!(Port::Number(22).number_with(|_| None), Some(22));
        assert_eq!(
            Port::Service("ssh".into()).number_with(|name| (name == "ssh").then_some(22)),
            Some(22)
        );
        assert_eq!(Port::Service("nope".into()).number_with(|_| None), None);
    }
}
