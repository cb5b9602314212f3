//! Error types for the portal client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire portal client.
///
/// Variants follow the failure taxonomy the UI distinguishes: local
/// validation, authorization, connectivity, and storage/serialization
/// failures underneath them.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortalError {
    /// Required input missing or blank, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server answered with a non-2xx status and (maybe) a message
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// 403 on a role-gated resource
    #[error("Permission denied")]
    Forbidden,

    /// 401 on an authorized call: token expired or invalid
    #[error("Session token expired or invalid")]
    Unauthorized,

    /// No session context when one is required
    #[error("Not logged in")]
    NotLoggedIn,

    /// Transport-level failure (DNS, refused connection, timeout)
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Realtime channel failure
    #[error("Realtime channel error: {0}")]
    Realtime(String),

    /// IO error (local storage)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::Connectivity(message.into())
    }

    pub fn realtime(message: impl Into<String>) -> Self {
        Self::Realtime(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }

    /// True for every failure the server used to refuse the caller:
    /// rejected logins, 403s and 401s alike.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::Rejected { .. } | Self::Forbidden | Self::Unauthorized
        )
    }

    /// True when the stored token should be discarded.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PortalError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, PortalError>`.
pub type Result<T> = std::result::Result<T, PortalError>;
