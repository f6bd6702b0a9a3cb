use std::fmt;
use std::fmt::{Display, Formatter};

// LibraryError is the closed set of failures the catalog core can produce. Transport
// vocabulary never leaks in here; see core::command for the one-way mapping.
#[derive(Debug)]
pub enum LibraryError {
    // malformed caller input (bad isbn, empty title)
    InvalidArgument {
        message: String,
    },
    NotFound {
        message: String,
    },
    // the target exists but its stock does not allow the operation
    FailedPrecondition {
        message: String,
    },
    // the backing store could not be decoded; never repaired automatically
    CorruptRecord {
        message: String,
        line: usize,
    },
    // temp write, sync or rename failed; the original file is left as it was
    Persistence {
        message: String,
    },
    // a worker running a critical section died before reporting back
    Runtime {
        message: String,
    },
}

impl LibraryError {
    pub fn invalid_argument(message: &str) -> LibraryError {
        LibraryError::InvalidArgument { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn failed_precondition(message: &str) -> LibraryError {
        LibraryError::FailedPrecondition { message: message.to_string() }
    }

    pub fn corrupt_record(message: &str, line: usize) -> LibraryError {
        LibraryError::CorruptRecord { message: message.to_string(), line }
    }

    pub fn persistence(message: &str) -> LibraryError {
        LibraryError::Persistence { message: message.to_string() }
    }

    pub fn runtime(message: &str) -> LibraryError {
        LibraryError::Runtime { message: message.to_string() }
    }

    // The core never retries on its own; callers decide.
    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::InvalidArgument { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::FailedPrecondition { .. } => { false }
            LibraryError::CorruptRecord { .. } => { false }
            LibraryError::Persistence { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, LibraryError::CorruptRecord { .. }
            | LibraryError::Persistence { .. }
            | LibraryError::Runtime { .. })
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::persistence(
            format!("catalog io {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::InvalidArgument { message } => {
                write!(f, "invalid argument: {}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "not found: {}", message)
            }
            LibraryError::FailedPrecondition { message } => {
                write!(f, "failed precondition: {}", message)
            }
            LibraryError::CorruptRecord { message, line } => {
                write!(f, "corrupt record at line {}: {}", line, message)
            }
            LibraryError::Persistence { message } => {
                write!(f, "persistence error: {}", message)
            }
            LibraryError::Runtime { message } => {
                write!(f, "runtime error: {}", message)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the catalog core.
pub type LibraryResult<T> = Result<T, LibraryError>;
