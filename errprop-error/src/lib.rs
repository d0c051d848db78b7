//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

use std::{any::Any, fmt::{self, Debug, Display, Formatter}};

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the kind as [`Any`], so that callers can downcast to the concrete error kind.
    fn as_any(&self) -> &dyn Any;

    /// The message describing what went wrong.
    fn message(&self) -> String;

    /// Optional help text describing what the caller can do to fix the error.
    fn help(&self) -> Option<String> {
        None
    }
}

/// An error associated with the operation that produced it.
#[derive(Debug)]
pub struct Error {
    /// The name of the operation this error originated from, such as `multiply`.
    pub operation: &'static str,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given operation name and kind.
    pub fn new(operation: &'static str, kind: impl ErrorKind + 'static) -> Self {
        Self { operation, kind: Box::new(kind) }
    }

    /// Returns the concrete error kind if it is of type `T`.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Returns true if the error kind is of type `T`.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.kind.message())?;
        if let Some(help) = self.kind.help() {
            write!(f, " (help: {})", help)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
