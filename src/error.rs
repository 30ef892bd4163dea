use thiserror::Error;

/// Errors returned by pool operations.
///
/// Every failure is reported synchronously to the caller of the operation
/// that caused it. The pool state is left exactly as it was before the
/// failing step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A new item was requested but the production policy needs a template
    /// that has not been configured.
    #[error("precondition violated: {reason}")]
    PreconditionViolation {
        /// What was missing.
        reason: &'static str,
    },

    /// The operation is not available for this pool configuration.
    #[error("invalid operation: {operation} requires outstanding tracking to be enabled")]
    InvalidOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// A bulk pull was asked for a negative number of items.
    #[error("invalid argument: pull count must not be negative, got {count}")]
    InvalidArgument {
        /// The rejected count.
        count: isize,
    },
}

impl Error {
    pub(crate) const fn template_not_set() -> Self {
        Error::PreconditionViolation {
            reason: "factory template not set",
        }
    }
}

/// A specialized `Result` type for pool operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = core::result::Result<T, Error>;
