//! Domain error types.

/// Top-level error type for wealthdesk.
#[derive(Debug, thiserror::Error)]
pub enum WealthdeskError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("gateway credentials incomplete: {reason}")]
    CredentialsMissing { reason: String },

    #[error("storage error in {store} store: {reason}")]
    Storage { store: String, reason: String },

    #[error("stored session record is corrupt: {reason}")]
    SessionCorrupt { reason: String },

    #[error("gateway connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&WealthdeskError> for std::process::ExitCode {
    fn from(err: &WealthdeskError) -> Self {
        let code: u8 = match err {
            WealthdeskError::Io(_) => 1,
            WealthdeskError::MissingField { .. } | WealthdeskError::CredentialsMissing { .. } => 2,
            WealthdeskError::Storage { .. } | WealthdeskError::SessionCorrupt { .. } => 3,
            WealthdeskError::ConnectionFailed { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
