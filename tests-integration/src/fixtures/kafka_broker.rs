//! Single-node KRaft broker reachable from other containers on the same network

use anyhow::Result;
use testcontainers::{
    ContainerAsync, GenericImage, ImageExt,
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
};

pub const BROKER_ALIAS: &str = "kafka-broker";
pub const BROKER_PORT: u16 = 9092;

const CONTROLLER_PORT: u16 = 9093;

/// Start a broker named `{BROKER_ALIAS}-{suffix}` on `network`
///
/// Only the in-network listener is advertised, so the broker is meant for
/// other containers, not for the test process.
pub async fn start_broker(network: &str, suffix: &str) -> Result<(ContainerAsync<GenericImage>, String)> {
    let name = format!("{BROKER_ALIAS}-{suffix}");
    let bootstrap_servers = format!("{name}:{BROKER_PORT}");

    let container = GenericImage::new("apache/kafka", "3.7.0")
        .with_exposed_port(BROKER_PORT.tcp())
        .with_wait_for(WaitFor::message_on_stdout("Kafka Server started"))
        .with_env_var("CLUSTER_ID", "4L6g3nShT-eMCtK--X86sw")
        .with_env_var("KAFKA_NODE_ID", "1")
        .with_env_var("KAFKA_PROCESS_ROLES", "broker,controller")
        .with_env_var(
            "KAFKA_LISTENERS",
            format!("PLAINTEXT://0.0.0.0:{BROKER_PORT},CONTROLLER://0.0.0.0:{CONTROLLER_PORT}"),
        )
        .with_env_var("KAFKA_ADVERTISED_LISTENERS", format!("PLAINTEXT://{bootstrap_servers}"))
        .with_env_var("KAFKA_CONTROLLER_LISTENER_NAMES", "CONTROLLER")
        .with_env_var(
            "KAFKA_LISTENER_SECURITY_PROTOCOL_MAP",
            "CONTROLLER:PLAINTEXT,PLAINTEXT:PLAINTEXT",
        )
        .with_env_var(
            "KAFKA_CONTROLLER_QUORUM_VOTERS",
            format!("1@localhost:{CONTROLLER_PORT}"),
        )
        .with_env_var("KAFKA_OFFSETS_TOPIC_REPLICATION_FACTOR", "1")
        .with_env_var("KAFKA_TRANSACTION_STATE_LOG_REPLICATION_FACTOR", "1")
        .with_env_var("KAFKA_TRANSACTION_STATE_LOG_MIN_ISR", "1")
        .with_env_var("KAFKA_GROUP_INITIAL_REBALANCE_DELAY_MS", "0")
        .with_network(network)
        .with_container_name(name)
        .start()
        .await?;

    tracing::debug!("Kafka broker started, bootstrap servers {bootstrap_servers}");
    Ok((container, bootstrap_servers))
}
