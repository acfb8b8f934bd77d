//! Configuration Module
//!
//! Cache tuning parameters and the server configuration loaded from
//! environment variables.

use std::env;
use std::time::Duration;

/// Lifetime used when `CACHE_TTL_MS` is not set.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

// == Cache Config ==
/// Parameters fixed when a cache is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Lifetime shared by every entry
    pub ttl: Duration,
    /// Period between reaper sweeps
    pub sweep_interval: Duration,
    /// Whether `get` treats expired-but-unswept entries as misses
    pub check_on_read: bool,
}

impl CacheConfig {
    /// Creates a config that sweeps once per `ttl` and checks freshness on read.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sweep_interval: ttl,
            check_on_read: true,
        }
    }

    /// Sets the period between reaper sweeps.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Sets whether `get` drops expired entries itself.
    pub fn with_check_on_read(mut self, check_on_read: bool) -> Self {
        self.check_on_read = check_on_read;
        self
    }

    /// Longest time past its TTL that an entry can still be returned by `get`.
    ///
    /// Zero when reads check freshness, otherwise one sweep interval.
    pub fn staleness_bound(&self) -> Duration {
        if self.check_on_read {
            Duration::ZERO
        } else {
            self.sweep_interval
        }
    }

    /// Longest time an entry can stay readable after insertion
    /// (`ttl + sweep_interval` under the presence policy).
    pub fn max_visible_lifetime(&self) -> Duration {
        self.ttl.saturating_add(self.staleness_bound())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

// == Server Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache settings
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry lifetime in milliseconds (default: 10000)
    /// - `SWEEP_INTERVAL_MS` - Reaper period in milliseconds (default: the TTL)
    /// - `CHECK_ON_READ` - `true`/`false`, expire on read (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source. Unparsable values fall back
    /// to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |name: &str| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let ttl = millis("CACHE_TTL_MS").unwrap_or(DEFAULT_TTL);
        let sweep_interval = millis("SWEEP_INTERVAL_MS").unwrap_or(ttl);
        let check_on_read = lookup("CHECK_ON_READ")
            .and_then(|v| v.trim().parse::<bool>().ok())
            .unwrap_or(true);

        Self {
            cache: CacheConfig::new(ttl)
                .with_sweep_interval(sweep_interval)
                .with_check_on_read(check_on_read),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
        }
    }
}
