//! Kafka Connect worker for integration tests, run through testcontainers.
//!
//! ```no_run
//! use kafka_connect_container::{ConnectorConfiguration, KafkaConnect, KafkaConnectContainer};
//!
//! # async fn demo() -> kafka_connect_container::Result<()> {
//! let image = KafkaConnect::new("kafka:9092").with_plugin("tests/resources/my-sink")?;
//! let connect = KafkaConnectContainer::start(image).await?;
//!
//! connect
//!     .with_connector(
//!         &ConnectorConfiguration::new("sink1")
//!             .add("connector.class", "com.example.MySinkConnector")
//!             .add("topics", "orders"),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connector;
pub mod container;
pub mod error;
pub mod image;
pub mod plugin;
pub mod registrar;

pub use config::KafkaConnectConfig;
pub use connector::ConnectorConfiguration;
pub use container::{ContainerHandle, KafkaConnectContainer};
pub use error::{ContainerOperationError, ErrorKind, Result};
pub use image::{CONNECT_REST_PORT, DEFAULT_PLUGINS_PATH, DEFAULT_SERVICE_NAME, KafkaConnect};
pub use plugin::{PluginMount, ResourceResolver, ResourceRoot};
