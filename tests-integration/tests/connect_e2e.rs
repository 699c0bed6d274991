//! End-to-end tests against a real Kafka Connect worker
//!
//! These need a Docker daemon and pull the broker and Connect images, so they
//! are ignored by default. Run with `cargo test -p tests-integration -- --ignored`.

use kafka_connect_container::{ConnectorConfiguration, ErrorKind, PluginMount};
use ntest::timeout;
use tests_integration::fixtures::ConnectTestContext;
use tests_integration::init_test_logging;

const MIRROR_HEARTBEAT: &str = "org.apache.kafka.connect.mirror.MirrorHeartbeatConnector";

#[tokio::test]
#[ignore = "requires Docker"]
#[timeout(300000)]
async fn test_worker_starts_without_connectors() {
    init_test_logging();
    let ctx = ConnectTestContext::new().await.unwrap();

    let url = ctx.connect.url().await.unwrap();
    assert!(url.starts_with("http://"), "{url}");
    assert!(ctx.connect.connectors().await.unwrap().is_empty());

    ctx.connect.stop().await.unwrap();
    ctx.connect.stop().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
#[timeout(300000)]
async fn test_register_bundled_connector() {
    init_test_logging();
    let ctx = ConnectTestContext::new().await.unwrap();

    let configuration = ConnectorConfiguration::new("heartbeats")
        .add("connector.class", MIRROR_HEARTBEAT)
        .add("tasks.max", "1")
        .add("source.cluster.alias", "source")
        .add("target.cluster.alias", "target")
        .add("source.cluster.bootstrap.servers", ctx.bootstrap_servers.as_str())
        .add("target.cluster.bootstrap.servers", ctx.bootstrap_servers.as_str());

    let returned = ctx.connect.with_connector(&configuration).await.unwrap();
    assert!(std::ptr::eq(returned, &ctx.connect));

    assert_eq!(
        ctx.connect.connectors().await.unwrap(),
        vec!["heartbeats".to_string()]
    );

    // Same name twice is refused by Connect itself
    let err = ctx.connect.with_connector(&configuration).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RegistrationRejected);
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
#[ignore = "requires Docker"]
#[timeout(300000)]
async fn test_unknown_connector_class_is_rejected() {
    init_test_logging();
    let ctx = ConnectTestContext::new().await.unwrap();

    let err = ctx
        .connect
        .with_connector(
            &ConnectorConfiguration::new("broken").add("connector.class", "com.example.Missing"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RegistrationRejected);
    assert!(
        err.to_string().contains("com.example.Missing"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
#[timeout(300000)]
async fn test_worker_starts_with_mounted_plugins() {
    init_test_logging();
    let resources = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(resources.path().join("noop-plugin")).unwrap();
    std::fs::write(resources.path().join("noop-plugin/README"), "no classes here").unwrap();
    let root = resources.path().to_path_buf();

    let mut mounted: Vec<PluginMount> = Vec::new();
    let ctx = ConnectTestContext::with_image(|image| {
        let image = image.with_plugin(root.join("noop-plugin").to_str().unwrap_or_default())?;
        mounted = image.plugins().to_vec();
        Ok(image)
    })
    .await
    .unwrap();

    assert_eq!(mounted.len(), 1);
    assert_eq!(mounted[0].container_path(), "/usr/share/java/noop-plugin");
    assert!(ctx.connect.connectors().await.unwrap().is_empty());
}
