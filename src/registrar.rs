//! Client side of the Kafka Connect REST API

use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use tracing::{debug, info, warn};

use crate::connector::ConnectorConfiguration;
use crate::error::{ContainerOperationError, ErrorKind, Result};

pub fn build_client(request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|e| {
            ContainerOperationError::with_source(
                ErrorKind::IoFailure,
                "Cannot build Kafka Connect REST client",
                e,
            )
        })
}

/// `POST {base_url}/connectors`, succeeding only on `201 Created`
pub async fn register_connector(
    client: &Client,
    base_url: &str,
    configuration: &ConnectorConfiguration,
) -> Result<()> {
    let url = format!("{base_url}/connectors");
    let body = configuration
        .to_json()
        .map_err(ContainerOperationError::unexpected)?;

    debug!("Creating connector {} via {url}", configuration.name());

    let response = client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(body)
        .send()
        .await
        .map_err(classify_send_error)?;

    let status = response.status();
    if status != StatusCode::CREATED {
        let cause = response
            .text()
            .await
            .map_err(ContainerOperationError::unexpected)?;
        warn!(
            "Kafka Connect rejected connector {} with {status}",
            configuration.name()
        );
        return Err(ContainerOperationError::rejected(status.as_u16(), &cause));
    }

    info!("Created Kafka Connect connector {}", configuration.name());
    Ok(())
}

/// `GET {base_url}/connectors`
pub async fn list_connectors(client: &Client, base_url: &str) -> Result<Vec<String>> {
    let response = client
        .get(format!("{base_url}/connectors"))
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| {
            if e.is_connect() || e.is_builder() {
                ContainerOperationError::connection_failed(e)
            } else {
                listing_failed(e)
            }
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        let cause = response.text().await.map_err(listing_failed)?;
        return Err(ContainerOperationError::new(
            ErrorKind::IoFailure,
            format!("Cannot list Kafka Connect connectors. Got {} code. Cause {cause}", status.as_u16()),
        )
        .with_status(status.as_u16()));
    }

    response
        .json::<Vec<String>>()
        .await
        .map_err(|e| {
            ContainerOperationError::with_source(
                ErrorKind::IoFailure,
                "Unexpected connector listing from Kafka Connect",
                e,
            )
        })
}

fn listing_failed(err: reqwest::Error) -> ContainerOperationError {
    ContainerOperationError::with_source(
        ErrorKind::IoFailure,
        "Unexpected error while listing Kafka Connect connectors",
        err,
    )
}

fn classify_send_error(err: reqwest::Error) -> ContainerOperationError {
    if err.is_connect() || err.is_builder() {
        ContainerOperationError::connection_failed(err)
    } else {
        ContainerOperationError::unexpected(err)
    }
}
