//! Async connectivity adapters for SAP Business One landscapes.
//!
//! A B1 installation is usually reached over three distinct channels, and this
//! crate provides one small adapter for each:
//!
//! - [`HanaAdapter`] — runs a statement against the HANA database over a
//!   transient connection opened and closed inside each call.
//! - [`SqlServerAdapter`] — runs a statement against SQL Server through a
//!   connection pool owned by the adapter instance.
//! - [`ServiceLayerAdapter`] — authenticates against the Service Layer REST
//!   API once, then issues arbitrary requests carrying the session cookie.
//!
//! The adapters are deliberately uncoupled: none depends on another, and each
//! returns its client library's result shape untouched. All three share the
//! same lifecycle — build a validated config, construct the adapter (no
//! network I/O happens here), then await `query`, `authenticate` or `request`.
//!
//! ```rust,no_run
//! use b1link::{ServiceLayerAdapter, ServiceLayerConfig};
//!
//! # async fn example() -> b1link::Result<()> {
//! let config = ServiceLayerConfig::new("https://b1.example.com", 50000, "v1", "SBODEMOUS");
//! let mut service_layer = ServiceLayerAdapter::new(config)?;
//!
//! service_layer.authenticate("manager", "secret").await?;
//! let orders = service_layer
//!     .request(b1link::Method::GET, "Orders?$top=5", None)
//!     .await?;
//! println!("{orders}");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod error;
pub mod logging;

pub use adapters::hana::{HanaAdapter, HanaConfig};
pub use adapters::service_layer::{
    LoginResponse, ServiceLayerAdapter, ServiceLayerConfig, SessionState,
};
pub use adapters::sqlserver::{SqlServerAdapter, SqlServerConfig};
pub use adapters::{PoolConfig, QueryExecutor};
pub use error::{AdapterError, Result};

/// HTTP method type accepted by [`ServiceLayerAdapter::request`].
pub use reqwest::Method;
