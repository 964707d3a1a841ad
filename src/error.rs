//! Error types shared by all adapters.
//!
//! Failures are classified by where they occurred (connecting, executing,
//! authenticating, transporting) while the underlying client library's error
//! stays reachable through [`std::error::Error::source`], so callers keep the
//! root cause without having to match on three different driver error types.

use thiserror::Error;

/// Boxed underlying cause from a client library.
type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for adapter operations.
///
/// The variant tells the caller which phase of a call failed; `source()`
/// yields the untouched driver or transport error for inspection.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Establishing a database connection (or checking one out of the pool)
    /// failed. Statement execution was never attempted.
    #[error("connection failed: {context}")]
    Connection {
        /// Where the connection attempt happened.
        context: String,
        /// Underlying driver error.
        #[source]
        source: Cause,
    },

    /// A statement was sent over an established connection and the execution
    /// itself failed.
    #[error("statement execution failed: {context}")]
    Execution {
        /// Which adapter executed the statement.
        context: String,
        /// Underlying driver error.
        #[source]
        source: Cause,
    },

    /// A login call was rejected or could not complete.
    #[error("authentication failed: {context}")]
    Authentication {
        /// Endpoint or status description.
        context: String,
        /// Underlying HTTP error.
        #[source]
        source: Cause,
    },

    /// An HTTP request failed in transit or was refused by the server.
    #[error("transport failure: {context}")]
    Transport {
        /// Endpoint or status description.
        context: String,
        /// Underlying HTTP error.
        #[source]
        source: Cause,
    },

    /// A configuration value was missing or malformed. Raised at adapter
    /// construction, never from inside a call.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// What was wrong with the configuration.
        message: String,
    },
}

/// Convenience alias for results carrying [`AdapterError`].
pub type Result<T> = std::result::Result<T, AdapterError>;

impl AdapterError {
    /// Creates a connection error with context.
    pub fn connection_failed<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates an execution error with context.
    pub fn execution_failed<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Execution {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates an authentication error with context.
    pub fn authentication_failed<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Authentication {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a transport error with context.
    pub fn transport_failed<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
