//! SQL Server adapter backed by an instance-scoped connection pool.
//!
//! Each adapter owns its own pool, created lazily at construction: two
//! adapters in the same process never share connection state. Pool bounds are
//! handed to the pooling library as-is.

use super::{PoolConfig, QueryExecutor};
use crate::error::AdapterError;
use crate::Result;
use async_trait::async_trait;
use bb8::Pool;
use bb8_tiberius::ConnectionManager;
use tiberius::{AuthMethod, Config, EncryptionLevel, Row};

/// Default SQL Server TCP port.
const DEFAULT_MSSQL_PORT: u16 = 1433;

/// Connection settings for a SQL Server instance.
///
/// Transport security is off by default (`encrypt: false`,
/// `trust_server_certificate: false`), matching the posture these adapters
/// have always shipped with for on-premise B1 installations. Both toggles are
/// explicit fields so deployments that terminate TLS at the server can opt in.
#[derive(Debug, Clone)]
pub struct SqlServerConfig {
    /// Hostname or address of the server.
    pub host: String,
    /// TCP port. Defaults to 1433.
    pub port: u16,
    /// SQL login name.
    pub username: String,
    /// Password for `username`.
    pub password: String,
    /// Database to run statements against.
    pub database: String,
    /// Pool bounds handed to the pooling library.
    pub pool: PoolConfig,
    /// Request an encrypted connection. Off by default.
    pub encrypt: bool,
    /// Skip server certificate verification when encrypting. Off by default.
    pub trust_server_certificate: bool,
}

impl SqlServerConfig {
    /// Creates a configuration with default port, pool bounds and transport
    /// posture.
    pub fn new(
        host: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_MSSQL_PORT,
            username: username.into(),
            password: password.into(),
            database: database.into(),
            pool: PoolConfig::default(),
            encrypt: false,
            trust_server_certificate: false,
        }
    }

    /// Validates the configuration, including the pool bounds.
    ///
    /// # Errors
    /// Returns a configuration error if host, username or database is empty,
    /// the port is zero, or the pool bounds are out of range.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AdapterError::configuration(
                "SQL Server host must not be empty",
            ));
        }
        if self.username.trim().is_empty() {
            return Err(AdapterError::configuration(
                "SQL Server username must not be empty",
            ));
        }
        if self.database.trim().is_empty() {
            return Err(AdapterError::configuration(
                "SQL Server database must not be empty",
            ));
        }
        if self.port == 0 {
            return Err(AdapterError::configuration(
                "SQL Server port must not be zero",
            ));
        }
        self.pool.validate()
    }
}

/// SQL Server adapter. Construction performs no network I/O; the first
/// connection is opened on the first [`query`](SqlServerAdapter::query) call.
pub struct SqlServerAdapter {
    pool: Pool<ConnectionManager>,
    host: String,
    port: u16,
    database: String,
}

impl SqlServerAdapter {
    /// Creates a new SQL Server adapter owning its connection pool.
    ///
    /// # Errors
    /// Returns a configuration error if validation fails.
    pub fn new(config: SqlServerConfig) -> Result<Self> {
        config.validate()?;

        let mut client_config = Config::new();
        client_config.host(&config.host);
        client_config.port(config.port);
        client_config.database(&config.database);
        client_config.authentication(AuthMethod::sql_server(&config.username, &config.password));
        if config.encrypt {
            client_config.encryption(EncryptionLevel::Required);
        } else {
            client_config.encryption(EncryptionLevel::NotSupported);
        }
        if config.trust_server_certificate {
            client_config.trust_cert();
        }

        let manager = ConnectionManager::new(client_config);
        let pool = Pool::builder()
            .max_size(config.pool.max_connections)
            .min_idle(Some(config.pool.min_idle))
            .idle_timeout(Some(config.pool.idle_timeout))
            .connection_timeout(config.pool.connect_timeout)
            .build_unchecked(manager);

        Ok(Self {
            pool,
            host: config.host,
            port: config.port,
            database: config.database,
        })
    }
}

#[async_trait]
impl QueryExecutor for SqlServerAdapter {
    type Output = Vec<Vec<Row>>;

    /// Executes one statement on a pooled connection.
    ///
    /// Returns every result set of the batch untouched; a multi-statement
    /// batch yields one inner `Vec<Row>` per statement.
    async fn query(&self, statement: &str) -> Result<Vec<Vec<Row>>> {
        tracing::debug!(adapter = %self.safe_description(), "checking out pooled connection");

        let mut connection = self
            .pool
            .get()
            .await
            .map_err(|e| AdapterError::connection_failed(self.safe_description(), e))?;

        let stream = connection
            .simple_query(statement)
            .await
            .map_err(|e| AdapterError::execution_failed(self.safe_description(), e))?;

        let results = stream
            .into_results()
            .await
            .map_err(|e| AdapterError::execution_failed(self.safe_description(), e))?;

        tracing::debug!(
            adapter = %self.safe_description(),
            result_sets = results.len(),
            "statement finished"
        );
        Ok(results)
    }

    fn safe_description(&self) -> String {
        format!(
            "sqlserver at {}:{}, database {}",
            self.host, self.port, self.database
        )
    }
}
