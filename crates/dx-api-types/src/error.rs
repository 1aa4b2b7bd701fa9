use thiserror::Error;

/// Result type returned by every backend operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure variant of a backend call.
///
/// Both the mock and the HTTP backend report every failure through this
/// type; nothing is thrown past the backend boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Identifier lookup missed.
    #[error("{entity} not found")]
    NotFound { entity: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Simulated or upstream transient failure.
    #[error("{0}")]
    Transient(String),

    #[error("Request timeout")]
    Timeout,

    /// Non-success HTTP status from the real backend.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("decode error: {0}")]
    Decode(String),

    /// Connection-level failure (DNS, refused, TLS).
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity: entity.into(),
        }
    }

    /// Stable machine-readable code, used in the wire envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Transient(_) => "TRANSIENT",
            ApiError::Timeout => "TIMEOUT",
            ApiError::Http { .. } => "HTTP",
            ApiError::Decode(_) => "DECODE",
            ApiError::Transport(_) => "TRANSPORT",
        }
    }

    /// Whether retrying the same call could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transient(_) | ApiError::Timeout | ApiError::Transport(_) => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// HTTP status of an upstream failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Rebuild an error from an envelope's `code`, `error` and `status`
    /// fields.
    ///
    /// Unknown or absent codes fall back to [`ApiError::Transient`]. An
    /// `HTTP` code without a status is reported as 500.
    pub fn from_code(code: Option<&str>, message: String, status: Option<u16>) -> Self {
        match code {
            Some("NOT_FOUND") => {
                let entity = message
                    .strip_suffix(" not found")
                    .unwrap_or(&message)
                    .to_string();
                ApiError::NotFound { entity }
            }
            Some("INVALID_CREDENTIALS") => ApiError::InvalidCredentials,
            Some("TIMEOUT") => ApiError::Timeout,
            Some("DECODE") => ApiError::Decode(strip(&message, "decode error: ")),
            Some("TRANSPORT") => ApiError::Transport(strip(&message, "transport error: ")),
            Some("HTTP") => ApiError::Http {
                status: status.unwrap_or(500),
                message,
            },
            _ => ApiError::Transient(message),
        }
    }
}

fn strip(message: &str, prefix: &str) -> String {
    message.strip_prefix(prefix).unwrap_or(message).to_string()
}
