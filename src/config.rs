//! Configuration for pinwire
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Default server endpoint
pub const DEFAULT_ADDRESS: &str = "blynk-cloud.com:8442";

/// Main configuration for a client instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port), resolved on every connect attempt
    pub address: String,

    /// Auth token sent as the single LOGIN field
    pub auth_token: String,

    /// Disable Nagle's algorithm on the transport
    pub tcp_nodelay: bool,

    // -------------------------------------------------------------------------
    // Reconnect Configuration
    // -------------------------------------------------------------------------
    /// Delay after the first failed connect attempt
    pub initial_backoff: Duration,

    /// Delay stops doubling once it reaches this value
    pub max_backoff: Duration,

    // -------------------------------------------------------------------------
    // Heartbeat Configuration
    // -------------------------------------------------------------------------
    /// How often the heartbeat thread wakes up
    pub heartbeat_tick: Duration,

    /// Idle time after which a PING is sent
    pub ping_interval: Duration,

    // -------------------------------------------------------------------------
    // Receive Configuration
    // -------------------------------------------------------------------------
    /// Receive buffer capacity in bytes, header included
    pub recv_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            auth_token: String::new(),
            tcp_nodelay: true,
            initial_backoff: Duration::from_secs(3),
            max_backoff: Duration::from_secs(192),
            heartbeat_tick: Duration::from_secs(1),
            ping_interval: Duration::from_secs(10),
            recv_buffer_size: 2000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server address (host:port)
    pub fn address(mut self, addr: impl Into<String>) -> Self {
        self.config.address = addr.into();
        self
    }

    /// Set the auth token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.config.auth_token = token.into();
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn tcp_nodelay(mut self, enabled: bool) -> Self {
        self.config.tcp_nodelay = enabled;
        self
    }

    /// Set the first reconnect delay
    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.config.initial_backoff = delay;
        self
    }

    /// Set the reconnect delay ceiling
    pub fn max_backoff(mut self, delay: Duration) -> Self {
        self.config.max_backoff = delay;
        self
    }

    /// Set the heartbeat wake-up period
    pub fn heartbeat_tick(mut self, tick: Duration) -> Self {
        self.config.heartbeat_tick = tick;
        self
    }

    /// Set the idle time that triggers a PING
    pub fn ping_interval(mut self, interval: Duration) -> Self {
        self.config.ping_interval = interval;
        self
    }

    /// Set the receive buffer capacity (in bytes)
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.config.recv_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
