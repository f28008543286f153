use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for jotdb operations.
///
/// This enum represents all possible error types that can occur while working
/// with a jotdb collection. Each kind describes a specific category of failure,
/// enabling precise error handling.
///
/// Expected "no result" conditions are never errors: a query that matches
/// nothing yields an empty `Vec` or `None`, not a `JotError`.
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::errors::{JotError, ErrorKind, JotResult};
///
/// fn example() -> JotResult<()> {
///     Err(JotError::new("Backing file is corrupted", ErrorKind::FileCorrupted))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Input Errors - actively used in create/save dispatch
    /// The input is not usable for the requested operation
    InvalidInput,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Generic validation error (e.g. empty field keys)
    ValidationError,

    // IO and Storage Errors - actively used at the file store boundary
    /// Generic IO error
    IOError,
    /// The backing file was not found
    FileNotFound,
    /// Permission denied for file operation
    PermissionDenied,
    /// Error accessing the backing file
    FileAccessError,
    /// Backing file data is corrupted or not a JSON object
    FileCorrupted,

    // Data Encoding Errors - actively used in JSON encode / UTF-8 conversion
    /// Error encoding or decoding data
    EncodingError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "Invalid input"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::FileAccessError => write!(f, "File access error"),
            ErrorKind::FileCorrupted => write!(f, "File corrupted"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom jotdb error type.
///
/// `JotError` encapsulates error information including the error message, kind,
/// and optional cause. It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::errors::{JotError, ErrorKind};
///
/// // Create a simple error
/// let err = JotError::new("File not found", ErrorKind::FileNotFound);
///
/// // Create an error with a cause
/// let cause = JotError::new("IO failed", ErrorKind::IOError);
/// let err = JotError::new_with_cause("Flush failed", ErrorKind::FileAccessError, cause);
/// ```
///
/// # Type alias
///
/// The `JotResult<T>` type alias is equivalent to `Result<T, JotError>` and is
/// used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct JotError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<JotError>>,
    backtrace: Atomic<Backtrace>,
}

impl JotError {
    /// Creates a new `JotError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `JotError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JotError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `JotError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `JotError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JotError) -> Self {
        JotError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<JotError>> {
        self.cause.as_ref()
    }
}

impl Display for JotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for JotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for jotdb operations.
///
/// `JotResult<T>` is shorthand for `Result<T, JotError>`.
/// All fallible jotdb operations return this type.
pub type JotResult<T> = Result<T, JotError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for JotError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        JotError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<std::string::FromUtf8Error> for JotError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        JotError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<serde_json::Error> for JotError {
    fn from(err: serde_json::Error) -> Self {
        let error_kind = if err.is_io() {
            ErrorKind::IOError
        } else {
            ErrorKind::EncodingError
        };
        JotError::new(&format!("JSON error: {}", err), error_kind)
    }
}

impl From<String> for JotError {
    fn from(msg: String) -> Self {
        JotError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for JotError {
    fn from(msg: &str) -> Self {
        JotError::new(msg, ErrorKind::InternalError)
    }
}
