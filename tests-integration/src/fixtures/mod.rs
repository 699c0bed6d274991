//! Test fixtures for integration testing
//!
//! These contexts start real containers and therefore need a Docker daemon.

mod connect_context;
mod kafka_broker;

pub use connect_context::ConnectTestContext;
pub use kafka_broker::{BROKER_ALIAS, BROKER_PORT, start_broker};
