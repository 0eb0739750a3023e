use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token missing or expired")]
    Unauthorized,

    #[error("Request rejected: {0}")]
    Rejected(ErrorBody),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Shown when a failed login carries no usable detail at all
const GENERIC_LOGIN_FAILURE: &str = "Failed to login. Please try again.";

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            400..=499 => ApiError::Rejected(ErrorBody::parse(status, body)),
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Human-readable failure reason for the login flow, extracted in
    /// priority order: server `message` field, server `error` field,
    /// transport error message, generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(body) => body.user_message(),
            ApiError::Network(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Error payload the backend attaches to rejected requests.
///
/// All fields are optional; a body that is not JSON at all parses to the
/// empty payload and falls through to the generic message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Echo of the rejected fields, when the server provides one.
    #[serde(default)]
    pub received: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn parse(status: reqwest::StatusCode, body: &str) -> Self {
        let mut parsed: Self = serde_json::from_str(body).unwrap_or_default();
        parsed.status = status.as_u16();
        parsed
    }

    /// The extraction chain for a user-facing message. The `received` echo
    /// is appended for diagnostics when present.
    pub fn user_message(&self) -> String {
        let mut message = self
            .message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string());
        if let Some(ref received) = self.received {
            message.push_str(&format!(" Received: {}", received));
        }
        message
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.user_message())
    }
}
