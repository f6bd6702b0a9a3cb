use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use crate::core::library::LibraryError;

// StatusKind is the status vocabulary a transport sees. The mapping from core
// errors is one-way; nothing below core::command knows these names.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusKind {
    NotFound,
    InvalidArgument,
    FailedPrecondition,
    Internal,
}

#[derive(Debug)]
pub enum CommandError {
    NotFound {
        message: String,
    },
    Validation {
        message: String,
    },
    Precondition {
        message: String,
    },
    // request body could not be read into a command request
    Serialization {
        message: String,
    },
    Internal {
        message: String,
        retryable: bool,
    },
}

impl CommandError {
    pub fn status_kind(&self) -> StatusKind {
        match self {
            CommandError::NotFound { .. } => StatusKind::NotFound,
            CommandError::Validation { .. } => StatusKind::InvalidArgument,
            CommandError::Precondition { .. } => StatusKind::FailedPrecondition,
            CommandError::Serialization { .. } => StatusKind::InvalidArgument,
            CommandError::Internal { .. } => StatusKind::Internal,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        let retryable = other.retryable();
        match other {
            LibraryError::InvalidArgument { message } => {
                CommandError::Validation { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::FailedPrecondition { message } => {
                CommandError::Precondition { message }
            }
            err @ LibraryError::CorruptRecord { .. } => {
                CommandError::Internal { message: err.to_string(), retryable }
            }
            LibraryError::Persistence { message } => {
                CommandError::Internal { message, retryable }
            }
            LibraryError::Runtime { message } => {
                CommandError::Internal { message, retryable }
            }
        }
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::Serialization { message: format!("malformed request {}", err) }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotFound { message } => write!(f, "{}", message),
            CommandError::Validation { message } => write!(f, "{}", message),
            CommandError::Precondition { message } => write!(f, "{}", message),
            CommandError::Serialization { message } => write!(f, "{}", message),
            CommandError::Internal { message, .. } => write!(f, "{}", message),
        }
    }
}
