use std::borrow::Cow;
use std::collections::BTreeMap;

use testcontainers::{
    Image,
    core::{ContainerPort, WaitFor, wait::HttpWaitStrategy},
};
use tracing::debug;

use crate::config::KafkaConnectConfig;
use crate::error::Result;
use crate::plugin::{PluginMount, ResourceResolver, ResourceRoot};

pub const DEFAULT_SERVICE_NAME: &str = "quickstart-tests-kafka-connect";
pub const DEFAULT_PLUGINS_PATH: &str = "/usr/share/java";
pub const CONNECT_REST_PORT: u16 = 28082;
pub const DEFAULT_INTERNAL_TOPIC_REPLICATION_FACTOR: u16 = 1;

const JSON_CONVERTER: &str = "org.apache.kafka.connect.json.JsonConverter";

/// Kafka Connect worker image, configured for a single-node test cluster
#[derive(Debug, Clone)]
pub struct KafkaConnect {
    config: KafkaConnectConfig,
    env_vars: BTreeMap<String, String>,
    plugins: Vec<PluginMount>,
    resources: ResourceRoot,
}

impl KafkaConnect {
    /// Connect worker talking to the brokers at `bootstrap_servers`, with default settings
    pub fn new(bootstrap_servers: impl Into<String>) -> Self {
        Self::with_config(bootstrap_servers, &KafkaConnectConfig::default())
    }

    pub fn with_config(bootstrap_servers: impl Into<String>, config: &KafkaConnectConfig) -> Self {
        let env_vars = connect_environment(bootstrap_servers.into(), &config.service_name);
        debug!(
            "Configured Kafka Connect {} as {}",
            config.image_reference(),
            config.service_name
        );

        Self {
            env_vars,
            plugins: Vec::new(),
            resources: ResourceRoot::new(&config.resources_dir),
            config: config.clone(),
        }
    }

    /// Mount a connector plugin, resolved against the configured resources directory
    pub fn with_plugin(self, resource_id: &str) -> Result<Self> {
        let resources = self.resources.clone();
        self.with_plugin_from(resource_id, &resources)
    }

    /// Mount a connector plugin located by `resolver`
    ///
    /// A directory lands at `/usr/share/java/{dir}`; a single file keeps its
    /// parent directory and lands at `/usr/share/java/{parent}/{file}`.
    pub fn with_plugin_from(
        mut self,
        resource_id: &str,
        resolver: &impl ResourceResolver,
    ) -> Result<Self> {
        let mount = PluginMount::resolve(resource_id, resolver)?;
        debug!(
            "Mounting plugin {} at {}",
            mount.host_path().display(),
            mount.container_path()
        );
        self.plugins.push(mount);
        Ok(self)
    }

    pub fn config(&self) -> &KafkaConnectConfig {
        &self.config
    }

    /// Environment handed to the Connect worker
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.env_vars
    }

    pub fn plugins(&self) -> &[PluginMount] {
        &self.plugins
    }
}

fn connect_environment(bootstrap_servers: String, service_name: &str) -> BTreeMap<String, String> {
    let replication_factor = DEFAULT_INTERNAL_TOPIC_REPLICATION_FACTOR.to_string();

    // https://docs.confluent.io/platform/current/installation/docker/config-reference.html#kconnect-long-configuration
    [
        ("CONNECT_BOOTSTRAP_SERVERS", bootstrap_servers),
        ("CONNECT_GROUP_ID", service_name.to_string()),
        ("CONNECT_CONFIG_STORAGE_TOPIC", format!("{service_name}-config")),
        ("CONNECT_CONFIG_STORAGE_REPLICATION_FACTOR", replication_factor.clone()),
        ("CONNECT_OFFSET_STORAGE_TOPIC", format!("{service_name}-offsets")),
        ("CONNECT_OFFSET_STORAGE_REPLICATION_FACTOR", replication_factor.clone()),
        ("CONNECT_STATUS_STORAGE_TOPIC", format!("{service_name}-status")),
        ("CONNECT_STATUS_STORAGE_REPLICATION_FACTOR", replication_factor),
        ("CONNECT_KEY_CONVERTER", JSON_CONVERTER.to_string()),
        ("CONNECT_VALUE_CONVERTER", JSON_CONVERTER.to_string()),
        ("CONNECT_INTERNAL_KEY_CONVERTER", JSON_CONVERTER.to_string()),
        ("CONNECT_INTERNAL_VALUE_CONVERTER", JSON_CONVERTER.to_string()),
        ("CONNECT_REST_ADVERTISED_HOST_NAME", service_name.to_string()),
        ("CONNECT_REST_PORT", CONNECT_REST_PORT.to_string()),
        ("CONNECT_PLUGIN_PATH", DEFAULT_PLUGINS_PATH.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

impl Image for KafkaConnect {
    fn name(&self) -> &str {
        &self.config.image
    }

    fn tag(&self) -> &str {
        &self.config.tag
    }

    fn ready_conditions(&self) -> Vec<WaitFor> {
        vec![WaitFor::http(
            HttpWaitStrategy::new("/")
                .with_port(ContainerPort::Tcp(CONNECT_REST_PORT))
                .with_expected_status_code(200_u16),
        )]
    }

    fn env_vars(
        &self,
    ) -> impl IntoIterator<Item = (impl Into<Cow<'_, str>>, impl Into<Cow<'_, str>>)> {
        self.env_vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn expose_ports(&self) -> &[ContainerPort] {
        static PORTS: &[ContainerPort] = &[ContainerPort::Tcp(CONNECT_REST_PORT)];
        PORTS
    }
}
