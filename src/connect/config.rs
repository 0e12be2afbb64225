//! Connector configuration

use std::time::Duration;

/// Connector configuration
///
/// Defaults reproduce a plain blocking connect: no per-attempt timeout and
/// OS default socket options. Use `ConnectorConfig::builder()` to change them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Timeout for each connect attempt (default: None, wait for the OS).
    /// A zero duration means no timeout.
    pub connect_timeout: Option<Duration>,
    /// Set TCP_NODELAY on the returned socket
    pub nodelay: bool,
    /// TCP keepalive idle time for the returned socket (default: None, OS default)
    pub keepalive: Option<Duration>,
}

impl ConnectorConfig {
    /// Configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder
    ///
    /// # Examples
    ///
    /// ```
    /// use inet_connect::connect::ConnectorConfig;
    /// use std::time::Duration;
    ///
    /// let config = ConnectorConfig::builder()
    ///     .connect_timeout(Duration::from_secs(5))
    ///     .nodelay(true)
    ///     .build();
    /// assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
    /// ```
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::default()
    }

    /// Timeout actually applied to an attempt; zero counts as unset
    pub(crate) fn attempt_timeout(&self) -> Option<Duration> {
        self.connect_timeout.filter(|timeout| !timeout.is_zero())
    }

    /// Whether any option has to be applied after connecting
    pub(crate) fn has_stream_options(&self) -> bool {
        self.nodelay || self.keepalive.is_some()
    }
}

/// Builder for [`ConnectorConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConnectorConfigBuilder {
    connect_timeout: Option<Duration>,
    nodelay: bool,
    keepalive: Option<Duration>,
}

impl ConnectorConfigBuilder {
    /// Set the per-attempt connect timeout
    ///
    /// An attempt that times out counts as a connect failure and the next
    /// candidate is tried. Total wall time is bounded by
    /// `timeout * candidates`. `Duration::ZERO` leaves the timeout unset.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = (!duration.is_zero()).then_some(duration);
        self
    }

    /// Set TCP_NODELAY on the returned socket
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.nodelay = enabled;
        self
    }

    /// Enable TCP keepalive with the given idle time
    pub fn keepalive(mut self, idle: Duration) -> Self {
        self.keepalive = Some(idle);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConnectorConfig {
        ConnectorConfig {
            connect_timeout: self.connect_timeout,
            nodelay: self.nodelay,
            keepalive: self.keepalive,
        }
    }
}
