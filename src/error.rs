use std::io;

use thiserror::Error;

/// Failure categories reported by content backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOErrorEnum {
    NotFound,
    PermissionDenied,
    IsDirectory,
    InvalidArg,
    InvalidData,
    NotSupported,
    TooLarge,
    UnexpectedEof,
    Failed,
}

/// Error raised by a [`Backend`](crate::backend::Backend) while resolving
/// metadata or reading a stream.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    kind: IOErrorEnum,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BackendError {
    pub fn new(kind: IOErrorEnum, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        kind: IOErrorEnum,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn kind(&self) -> IOErrorEnum {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for BackendError {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => IOErrorEnum::NotFound,
            io::ErrorKind::PermissionDenied => IOErrorEnum::PermissionDenied,
            io::ErrorKind::InvalidInput => IOErrorEnum::InvalidArg,
            io::ErrorKind::InvalidData => IOErrorEnum::InvalidData,
            io::ErrorKind::Unsupported => IOErrorEnum::NotSupported,
            io::ErrorKind::UnexpectedEof => IOErrorEnum::UnexpectedEof,
            _ => IOErrorEnum::Failed,
        };

        Self::with_source(kind, err.to_string(), Box::new(err))
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Category of a failed plugin call, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required option was missing. Raised before any backend call.
    InvalidArgument,
    /// MIME lookup or readability probe failed.
    ResolutionFailure,
    /// Stream open, read or decode failed.
    ReadFailure,
    /// The host asked for a method this plugin does not expose.
    NotImplemented,
    /// A bridge request line was not a valid request.
    MalformedRequest,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::ResolutionFailure => "RESOLUTION_FAILURE",
            ErrorKind::ReadFailure => "READ_FAILURE",
            ErrorKind::NotImplemented => "NOT_IMPLEMENTED",
            ErrorKind::MalformedRequest => "PARSE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct FileUtilsError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BackendError>,
}

impl FileUtilsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            message: message.into(),
            source: None,
        }
    }

    pub fn resolution(err: BackendError) -> Self {
        Self {
            kind: ErrorKind::ResolutionFailure,
            message: format!("Error getting file extension: {}", err),
            source: Some(err),
        }
    }

    pub fn read(err: BackendError) -> Self {
        Self {
            kind: ErrorKind::ReadFailure,
            message: format!("Failed to read file content: {}", err),
            source: Some(err),
        }
    }

    pub fn not_implemented(method: &str) -> Self {
        Self {
            kind: ErrorKind::NotImplemented,
            message: format!("Method not implemented: {}", method),
            source: None,
        }
    }

    pub fn malformed_request(err: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::MalformedRequest,
            message: format!("Malformed request: {}", err),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The backend failure this error wraps, if any.
    pub fn cause(&self) -> Option<&BackendError> {
        self.source.as_ref()
    }
}

pub type Result<T> = std::result::Result<T, FileUtilsError>;
