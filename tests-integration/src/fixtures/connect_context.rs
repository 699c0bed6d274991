//! Kafka Connect test context
//!
//! Starts a broker and a Connect worker on a private Docker network.

use anyhow::Result;
use kafka_connect_container::{KafkaConnect, KafkaConnectConfig, KafkaConnectContainer};
use testcontainers::{ContainerAsync, GenericImage};
use uuid::Uuid;

use super::kafka_broker::start_broker;

pub struct ConnectTestContext {
    pub connect: KafkaConnectContainer,
    pub bootstrap_servers: String,
    pub network: String,
    #[allow(dead_code)] // Used to keep container alive during test
    broker: ContainerAsync<GenericImage>,
}

impl ConnectTestContext {
    /// Broker plus a Connect worker without extra plugins
    pub async fn new() -> Result<Self> {
        Self::with_image(Ok).await
    }

    /// Broker plus a Connect worker; `customize` may mount plugins before start
    pub async fn with_image<F>(customize: F) -> Result<Self>
    where
        F: FnOnce(KafkaConnect) -> kafka_connect_container::Result<KafkaConnect>,
    {
        let suffix = Uuid::new_v4().simple().to_string();
        let network = format!("connect-tests-{suffix}");

        let (broker, bootstrap_servers) = start_broker(&network, &suffix).await?;

        let config = KafkaConnectConfig {
            service_name: format!("{}-{suffix}", kafka_connect_container::DEFAULT_SERVICE_NAME),
            network: Some(network.clone()),
            ..KafkaConnectConfig::load().map_err(|e| anyhow::anyhow!("{e}"))?
        };
        let image = customize(KafkaConnect::with_config(&bootstrap_servers, &config))?;
        let connect = KafkaConnectContainer::start(image).await?;

        tracing::info!("Kafka Connect ready at {}", connect.url().await?);

        Ok(Self {
            connect,
            bootstrap_servers,
            network,
            broker,
        })
    }
}
