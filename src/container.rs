use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use testcontainers::{
    ContainerAsync, ContainerRequest, Image, ImageExt,
    core::ContainerPort,
    runners::AsyncRunner,
};
use tracing::{debug, info};

use crate::connector::ConnectorConfiguration;
use crate::error::{ContainerOperationError, Result};
use crate::image::{CONNECT_REST_PORT, KafkaConnect};
use crate::registrar;

/// The parts of a running container the Connect helpers rely on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerHandle: Send + Sync {
    /// Host the container is reachable on from the test process
    async fn host(&self) -> Result<String>;

    /// Host port mapped to `internal_port`
    async fn mapped_port(&self, internal_port: u16) -> Result<u16>;

    async fn stop(&self) -> Result<()>;
}

#[async_trait]
impl<I: Image> ContainerHandle for ContainerAsync<I> {
    async fn host(&self) -> Result<String> {
        Ok(self.get_host().await?.to_string())
    }

    async fn mapped_port(&self, internal_port: u16) -> Result<u16> {
        Ok(self
            .get_host_port_ipv4(ContainerPort::Tcp(internal_port))
            .await?)
    }

    async fn stop(&self) -> Result<()> {
        Ok(ContainerAsync::stop(self).await?)
    }
}

/// A started Kafka Connect worker
///
/// The container is removed when this value is dropped.
#[derive(Debug)]
pub struct KafkaConnectContainer<H = ContainerAsync<KafkaConnect>> {
    handle: H,
    client: reqwest::Client,
    stopped: AtomicBool,
}

impl KafkaConnectContainer {
    /// Start `image` and wait until its REST endpoint answers
    pub async fn start(image: KafkaConnect) -> Result<Self> {
        let config = image.config().clone();
        let request = container_request(image);

        info!(
            "Starting Kafka Connect {} (startup timeout {:?})",
            config.image_reference(),
            config.startup_timeout
        );
        let container = request.start().await?;

        Self::from_handle(container, config.request_timeout)
    }
}

/// Everything the runtime needs to start `image`: startup timeout, plugin
/// mounts and, when configured, the network and container name
pub fn container_request(image: KafkaConnect) -> ContainerRequest<KafkaConnect> {
    let config = image.config().clone();
    let mounts: Vec<_> = image
        .plugins()
        .iter()
        .map(|plugin| plugin.to_bind_mount())
        .collect();

    let mut request = image.with_startup_timeout(config.startup_timeout);
    for mount in mounts {
        request = request.with_mount(mount);
    }
    if let Some(network) = config.network {
        request = request
            .with_network(network)
            .with_container_name(config.service_name);
    }
    request
}

impl<H: ContainerHandle> KafkaConnectContainer<H> {
    pub fn from_handle(handle: H, request_timeout: Duration) -> Result<Self> {
        Ok(Self {
            handle,
            client: registrar::build_client(request_timeout)?,
            stopped: AtomicBool::new(false),
        })
    }

    /// Base URL of the Connect REST API, e.g. `http://localhost:32768`
    pub async fn url(&self) -> Result<String> {
        let host = self.handle.host().await?;
        let port = self.handle.mapped_port(CONNECT_REST_PORT).await?;
        Ok(format!("http://{host}:{port}"))
    }

    /// Register a connector; only valid once the container is running
    pub async fn with_connector(&self, configuration: &ConnectorConfiguration) -> Result<&Self> {
        let base_url = self
            .url()
            .await
            .map_err(ContainerOperationError::connection_failed)?;
        registrar::register_connector(&self.client, &base_url, configuration).await?;
        Ok(self)
    }

    /// Names of the connectors currently registered
    pub async fn connectors(&self) -> Result<Vec<String>> {
        let base_url = self
            .url()
            .await
            .map_err(ContainerOperationError::connection_failed)?;
        registrar::list_connectors(&self.client, &base_url).await
    }

    /// Stop the worker; later calls do nothing
    pub async fn stop(&self) -> Result<()> {
        if self.stopped.swap(true, Ordering::SeqCst) {
            debug!("Kafka Connect container already stopped");
            return Ok(());
        }
        if let Err(e) = self.handle.stop().await {
            self.stopped.store(false, Ordering::SeqCst);
            return Err(e);
        }
        info!("Stopped Kafka Connect container");
        Ok(())
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }
}
