//! Adapter implementations for the systems around a B1 installation.
//!
//! Each submodule wraps exactly one client library and stays independent of
//! the others. The database adapters share the [`QueryExecutor`] call shape;
//! the Service Layer adapter has its own authenticate/request surface because
//! its sessions have no database equivalent.

use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub mod hana;
pub mod service_layer;
pub mod sqlserver;

/// Uniform call shape for the database adapters.
///
/// `Output` is whatever row/result structure the underlying client returns;
/// implementations pass it through without reshaping it.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Raw result type of the underlying client library.
    type Output;

    /// Executes one statement and returns the client library's raw result.
    ///
    /// The statement text is opaque to this crate: it is handed to the driver
    /// unvalidated and unmodified.
    ///
    /// # Errors
    /// Returns a connection-kind error if no connection could be established
    /// (execution is never attempted in that case), or an execution-kind
    /// error if the statement failed on an established connection.
    async fn query(&self, statement: &str) -> Result<Self::Output>;

    /// Credential-free description of the target, safe for logging.
    fn safe_description(&self) -> String;
}

/// Bounds handed to the SQL Server connection pool.
///
/// These values configure the pooling library; nothing in this crate enforces
/// them. The defaults mirror the posture the adapters have always shipped
/// with: up to 10 connections, none kept warm, 30 second idle timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Maximum number of concurrent connections.
    pub max_connections: u32,
    /// Minimum number of idle connections kept open.
    pub min_idle: u32,
    /// How long an idle connection may live before it is reaped.
    pub idle_timeout: Duration,
    /// How long a checkout may wait for a connection before failing.
    pub connect_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_idle: 0,
            idle_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    /// Creates a builder pre-populated with the defaults.
    #[must_use]
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder {
            config: Self::default(),
        }
    }

    /// Validates the pool bounds.
    ///
    /// # Errors
    /// Returns a configuration error if `max_connections` is zero or above
    /// 1000, if `min_idle` exceeds `max_connections`, or if either timeout
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(crate::AdapterError::configuration(
                "pool max_connections must be at least 1",
            ));
        }
        if self.max_connections > 1000 {
            return Err(crate::AdapterError::configuration(
                "pool max_connections must not exceed 1000",
            ));
        }
        if self.min_idle > self.max_connections {
            return Err(crate::AdapterError::configuration(format!(
                "pool min_idle ({}) must not exceed max_connections ({})",
                self.min_idle, self.max_connections
            )));
        }
        if self.idle_timeout.is_zero() {
            return Err(crate::AdapterError::configuration(
                "pool idle_timeout must be non-zero",
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(crate::AdapterError::configuration(
                "pool connect_timeout must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Builder for [`PoolConfig`].
#[derive(Debug, Clone)]
pub struct PoolConfigBuilder {
    config: PoolConfig,
}

impl PoolConfigBuilder {
    /// Sets the maximum number of concurrent connections.
    #[must_use]
    pub fn max_connections(mut self, max: u32) -> Self {
        self.config.max_connections = max;
        self
    }

    /// Sets the minimum number of idle connections.
    #[must_use]
    pub fn min_idle(mut self, min: u32) -> Self {
        self.config.min_idle = min;
        self
    }

    /// Sets the idle connection timeout.
    #[must_use]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Sets the checkout timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Finalizes the configuration.
    #[must_use]
    pub fn build(self) -> PoolConfig {
        self.config
    }
}
