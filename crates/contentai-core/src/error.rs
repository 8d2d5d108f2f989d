//! Error types for the ContentAI client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A follow-up suggestion attached to an error when it is constructed.
///
/// The hint is chosen by whoever builds the error (for example the transport
/// layer when it sees a 404) so that callers never have to inspect message
/// text to decide what to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Remediation {
    /// The backend is unreachable or misbehaving.
    CheckBackend,
    /// The requested path does not exist on the backend.
    VerifyEndpoint,
    /// The call needs a signed-in session.
    SignIn,
}

impl Remediation {
    /// Human readable hint appended to user-facing messages.
    pub fn hint(&self) -> &'static str {
        match self {
            Remediation::CheckBackend => {
                "Please ensure the backend server is running and configured properly."
            }
            Remediation::VerifyEndpoint => "Please verify the API endpoint.",
            Remediation::SignIn => "Please sign in and try again.",
        }
    }
}

/// Shared error type for every ContentAI crate.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ContentError {
    /// A protected call was attempted without a bearer token.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The backend answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Http {
        status: u16,
        message: String,
        remediation: Option<Remediation>,
    },

    /// The backend answered successfully but the payload had an unexpected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The backend answered normally but reported that generation failed.
    #[error("{0}")]
    Generation(String),

    /// Local failure on the client side (image probe, clipboard, ...).
    #[error("{0}")]
    Client(String),

    /// The request did not pass local validation and was never sent.
    #[error("{0}")]
    Validation(String),

    /// The request could not reach the backend.
    #[error("Network error: {message}")]
    Network {
        message: String,
        remediation: Option<Remediation>,
    },

    /// Local persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Several independent operations failed together.
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ContentError>),
}

impl ContentError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an HTTP error, picking the remediation from the status code.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        let remediation = match status {
            401 | 403 => Some(Remediation::SignIn),
            404 => Some(Remediation::VerifyEndpoint),
            _ => Some(Remediation::CheckBackend),
        };
        Self::Http {
            status,
            message: message.into(),
            remediation,
        }
    }

    /// Creates a network error. Connection failures always point at the backend.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            remediation: Some(Remediation::CheckBackend),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_authentication_required(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }

    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse(_))
    }

    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// Returns the HTTP status if this is an `Http` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the remediation hint attached when the error was built.
    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            Self::AuthenticationRequired => Some(Remediation::SignIn),
            Self::Http { remediation, .. } | Self::Network { remediation, .. } => *remediation,
            _ => None,
        }
    }

    /// Renders the error for display, e.g. `"Post generation failed: ... <hint>"`.
    pub fn user_message(&self, context: &str) -> String {
        match self.remediation() {
            Some(remediation) => format!("{} failed: {} {}", context, self, remediation.hint()),
            None => format!("{} failed: {}", context, self),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ContentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ContentError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ContentError>`.
pub type Result<T> = std::result::Result<T, ContentError>;
