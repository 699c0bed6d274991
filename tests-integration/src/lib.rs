/// Docker-backed fixtures for exercising the Kafka Connect container end to end
pub mod fixtures;

/// Initialize test logging
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("kafka_connect_container=debug,tests_integration=debug,info")
        .with_test_writer()
        .try_init();
}
