use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::image::DEFAULT_SERVICE_NAME;

pub const CONFIG_FILE: &str = "kafka-connect.toml";
pub const ENV_PREFIX: &str = "KAFKA_CONNECT__";

/// Settings for the Kafka Connect test container
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KafkaConnectConfig {
    /// Docker image name
    pub image: String,
    /// Docker image tag
    pub tag: String,
    /// Network alias, consumer group id and advertised REST host name
    pub service_name: String,
    /// Docker network to join; the container is named after `service_name` on it
    pub network: Option<String>,
    /// How long the REST endpoint may take to come up
    #[serde(with = "humantime_serde")]
    pub startup_timeout: Duration,
    /// Timeout for each request against the Connect REST API
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Base directory relative plugin resources are resolved against
    pub resources_dir: PathBuf,
}

impl Default for KafkaConnectConfig {
    fn default() -> Self {
        Self {
            image: "confluentinc/cp-kafka-connect".to_string(),
            tag: "7.6.1".to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            network: None,
            startup_timeout: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
            resources_dir: PathBuf::from("."),
        }
    }
}

impl KafkaConnectConfig {
    /// Defaults, then `kafka-connect.toml`, then `KAFKA_CONNECT__*` variables
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::figment().extract().map_err(Box::new)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(KafkaConnectConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn image_reference(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_match_connect_quickstart() {
        let config = KafkaConnectConfig::default();

        assert_eq!(config.service_name, "quickstart-tests-kafka-connect");
        assert_eq!(config.startup_timeout, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.network, None);
        assert_eq!(
            config.image_reference(),
            "confluentinc/cp-kafka-connect:7.6.1"
        );
    }

    #[test]
    fn test_configless_load() {
        Jail::expect_with(|_jail| {
            let config = KafkaConnectConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config, KafkaConnectConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                tag = "7.4.0"
                network = "connect-tests"
                startup_timeout = "2m"
                "#,
            )?;

            let config = KafkaConnectConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.tag, "7.4.0");
            assert_eq!(config.network.as_deref(), Some("connect-tests"));
            assert_eq!(config.startup_timeout, Duration::from_secs(120));
            assert_eq!(config.image, "confluentinc/cp-kafka-connect");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, r#"request_timeout = "5s""#)?;
            jail.set_env("KAFKA_CONNECT__REQUEST_TIMEOUT", "750ms");
            jail.set_env("KAFKA_CONNECT__SERVICE_NAME", "connect-under-test");

            let config = KafkaConnectConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.request_timeout, Duration::from_millis(750));
            assert_eq!(config.service_name, "connect-under-test");
            Ok(())
        });
    }
}
