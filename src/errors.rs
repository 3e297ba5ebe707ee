//! Failure taxonomy
//!
//! Operations return `anyhow::Result` and attach context as errors cross component
//! boundaries. The root cause of a classified failure is a [`GotError`]; raw storage
//! failures stay `std::io::Error`. [`ErrorKind::of`] recovers the class from a chain.

/// Classified root causes raised by the engine.
#[derive(Debug, thiserror::Error)]
pub enum GotError {
    /// An object, ref or index entry is absent.
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    /// Persisted data failed validation.
    #[error("corrupt {what}: {reason}")]
    Corrupt { what: &'static str, reason: String },

    /// The operation is not allowed in the current repository state.
    #[error("{0}")]
    InvalidOperation(String),
}

impl GotError {
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        GotError::NotFound {
            what,
            name: name.into(),
        }
    }

    pub fn corrupt(what: &'static str, reason: impl Into<String>) -> Self {
        GotError::Corrupt {
            what,
            reason: reason.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        GotError::InvalidOperation(message.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Corrupt,
    InvalidOperation,
    IoFailure,
    Other,
}

impl ErrorKind {
    /// Classify an error by the first recognised cause in its chain.
    pub fn of(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(got_error) = cause.downcast_ref::<GotError>() {
                return match got_error {
                    GotError::NotFound { .. } => ErrorKind::NotFound,
                    GotError::Corrupt { .. } => ErrorKind::Corrupt,
                    GotError::InvalidOperation(_) => ErrorKind::InvalidOperation,
                };
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return ErrorKind::IoFailure;
            }
            if cause.downcast_ref::<serde_json::Error>().is_some() {
                return ErrorKind::Corrupt;
            }
        }

        ErrorKind::Other
    }
}
