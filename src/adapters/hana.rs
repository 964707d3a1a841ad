//! HANA database adapter with a transient connection per statement.
//!
//! The adapter holds credentials only; every [`query`](HanaAdapter::query)
//! call opens its own connection, executes the statement, and closes the
//! connection again before resolving. There is no pooling and no retry.

use super::QueryExecutor;
use crate::error::AdapterError;
use crate::Result;
use async_trait::async_trait;
use hdbconnect_async::{ConnectParams, Connection, HdbResponse};

/// Default HANA SQL port of the system database tenant.
const DEFAULT_HANA_PORT: u16 = 30015;

/// Connection settings for a HANA instance.
#[derive(Debug, Clone)]
pub struct HanaConfig {
    /// Hostname or address of the HANA server.
    pub host: String,
    /// SQL port. Defaults to 30015.
    pub port: u16,
    /// Database user.
    pub username: String,
    /// Password for `username`.
    pub password: String,
}

impl HanaConfig {
    /// Creates a configuration with the default SQL port.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_HANA_PORT,
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns a configuration error if the host or username is empty, or if
    /// the port is zero.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AdapterError::configuration("HANA host must not be empty"));
        }
        if self.username.trim().is_empty() {
            return Err(AdapterError::configuration(
                "HANA username must not be empty",
            ));
        }
        if self.port == 0 {
            return Err(AdapterError::configuration("HANA port must not be zero"));
        }
        Ok(())
    }
}

/// HANA adapter. Construction performs no network I/O.
pub struct HanaAdapter {
    params: ConnectParams,
    host: String,
    port: u16,
}

impl HanaAdapter {
    /// Creates a new HANA adapter from a validated configuration.
    ///
    /// Connection parameters are prepared here so that malformed settings
    /// fail at construction rather than inside the first statement; the
    /// server is not contacted.
    ///
    /// # Errors
    /// Returns a configuration error if validation fails or the driver
    /// rejects the parameters.
    pub fn new(config: HanaConfig) -> Result<Self> {
        config.validate()?;

        let params = ConnectParams::builder()
            .hostname(&config.host)
            .port(config.port)
            .dbuser(&config.username)
            .password(&config.password)
            .build()
            .map_err(|e| {
                AdapterError::configuration(format!("invalid HANA connection parameters: {e}"))
            })?;

        Ok(Self {
            params,
            host: config.host,
            port: config.port,
        })
    }
}

#[async_trait]
impl QueryExecutor for HanaAdapter {
    type Output = HdbResponse;

    /// Executes one statement over a fresh connection.
    ///
    /// If the connection cannot be established the statement is never sent.
    /// Whether execution succeeds or fails, the connection is dropped (and
    /// the server session closed) before this call returns.
    async fn query(&self, statement: &str) -> Result<HdbResponse> {
        tracing::debug!(adapter = %self.safe_description(), "opening HANA connection");

        let connection = Connection::new(self.params.clone())
            .await
            .map_err(|e| AdapterError::connection_failed(self.safe_description(), e))?;

        let result = connection
            .statement(statement)
            .await
            .map_err(|e| AdapterError::execution_failed(self.safe_description(), e));

        // Dropping `connection` here closes the session on both paths.
        drop(connection);

        tracing::debug!(
            adapter = %self.safe_description(),
            ok = result.is_ok(),
            "HANA statement finished, connection closed"
        );
        result
    }

    fn safe_description(&self) -> String {
        format!("hana at {}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation_rejects_empty_host() {
        let config = HanaConfig::new("", "SYSTEM", "secret");
        assert!(config.validate().is_err());

        let config = HanaConfig::new("   ", "SYSTEM", "secret");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_empty_username() {
        let config = HanaConfig::new("hana01", "", "secret");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_zero_port() {
        let mut config = HanaConfig::new("hana01", "SYSTEM", "secret");
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_defaults_to_hana_sql_port() {
        let config = HanaConfig::new("hana01", "SYSTEM", "secret");
        assert_eq!(config.port, 30015);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_constructor_rejects_invalid_config() {
        let result = HanaAdapter::new(HanaConfig::new("", "SYSTEM", "secret"));
        assert!(matches!(
            result,
            Err(AdapterError::Configuration { .. })
        ));
    }

    #[test]
    fn test_safe_description_has_no_credentials() {
        let adapter = HanaAdapter::new(HanaConfig::new("hana01", "SYSTEM", "secret")).unwrap();
        let description = adapter.safe_description();
        assert!(description.contains("hana01"));
        assert!(!description.contains("SYSTEM"));
        assert!(!description.contains("secret"));
    }
}
