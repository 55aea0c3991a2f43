//! Error types for the client.
//!
//! # Design
//! Only construction and verb parsing return `ClientError`. A failed
//! request is not an error of the call: `TransportError` is logged and kept
//! in the client's last response so the caller can inspect it afterwards.

use thiserror::Error;

/// Exit code a host program should use when the transport is unavailable.
pub const CAPABILITY_MISSING_EXIT_CODE: i32 = 187;

/// Errors returned by `HttpClient` constructors and verb parsing.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport cannot operate in this environment.
    #[error("environment does not satisfy client requirements, missing dependency: {transport}")]
    CapabilityMissing { transport: String },

    /// A verb string did not name a supported HTTP method.
    #[error("unsupported HTTP method: {0}")]
    UnknownMethod(String),
}

impl ClientError {
    /// Process exit code matching this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::CapabilityMissing { .. } => CAPABILITY_MISSING_EXIT_CODE,
            ClientError::UnknownMethod(_) => 1,
        }
    }
}

/// A request that produced no usable response.
///
/// `status` is set when the server answered but the body could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
    pub status: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_missing_uses_dedicated_exit_code() {
        let err = ClientError::CapabilityMissing {
            transport: "ureq".to_string(),
        };
        assert_eq!(err.exit_code(), 187);
        assert!(err.to_string().contains("ureq"));
    }

    #[test]
    fn transport_error_keeps_status() {
        let err = TransportError::new("body read failed").with_status(200);
        assert_eq!(err.status, Some(200));
        assert_eq!(err.to_string(), "transport failure: body read failed");
    }
}
