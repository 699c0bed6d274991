use std::fmt;

use testcontainers::TestcontainersError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What went wrong while operating on the Kafka Connect container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A plugin resource could not be resolved or does not exist on disk
    ResourceNotFound,
    /// The Connect REST endpoint could not be reached
    ConnectionFailed,
    /// Connect answered the registration with something other than `201 Created`
    RegistrationRejected,
    /// Any other I/O failure during a request/response cycle
    IoFailure,
    /// The container runtime failed to start, stop or describe the container
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ResourceNotFound => "resource not found",
            ErrorKind::ConnectionFailed => "connection failed",
            ErrorKind::RegistrationRejected => "registration rejected",
            ErrorKind::IoFailure => "i/o failure",
            ErrorKind::Runtime => "container runtime",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ContainerOperationError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    #[source]
    source: Option<BoxError>,
}

impl ContainerOperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: Some(source.into()),
        }
    }

    pub fn resource_not_found(path: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::ResourceNotFound,
            format!("Resource with path {path} couldn't be found"),
        )
    }

    pub fn connection_failed(source: impl Into<BoxError>) -> Self {
        Self::with_source(
            ErrorKind::ConnectionFailed,
            "Cannot open connection to Kafka Connect",
            source,
        )
    }

    pub fn unexpected(source: impl Into<BoxError>) -> Self {
        Self::with_source(
            ErrorKind::IoFailure,
            "Unexpected error while creating Kafka Connect connector",
            source,
        )
    }

    /// Connect refused the connector; `body` is the remote diagnostic verbatim
    pub fn rejected(status: u16, body: &str) -> Self {
        Self {
            kind: ErrorKind::RegistrationRejected,
            message: format!(
                "Cannot create Kafka Connect connector. Got {status} code. Cause {body}"
            ),
            status: Some(status),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by Connect, if the failure came from a response
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl From<TestcontainersError> for ContainerOperationError {
    fn from(err: TestcontainersError) -> Self {
        Self::with_source(
            ErrorKind::Runtime,
            format!("Container runtime error: {err}"),
            err,
        )
    }
}

pub type Result<T> = std::result::Result<T, ContainerOperationError>;
