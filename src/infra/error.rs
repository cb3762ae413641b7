//! Error types for the infrastructure layer.

use std::collections::BTreeMap;

use thiserror::Error;

use scorta_api_types::ErrorBody;

/// Classified failure of a remote API call.
///
/// The kinds are clonable values (no wrapped transport errors) so a result
/// can be shared across de-duplicated callers and kept in cache entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network unavailable: {detail}")]
    NetworkUnavailable { detail: String },
    #[error("request timed out")]
    Timeout,
    #[error("unauthorized")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("validation failed: {message}")]
    ValidationFailed {
        message: String,
        /// Field name → messages, as reported by the API.
        fields: BTreeMap<String, Vec<String>>,
    },
    #[error("server fault (status {status}): {message}")]
    ServerFault { status: u16, message: String },
    #[error("failed to decode response: {detail}")]
    Decode { detail: String },
}

impl ApiError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::NetworkUnavailable {
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
        }
    }

    pub fn server_fault(status: u16, message: impl Into<String>) -> Self {
        Self::ServerFault {
            status,
            message: message.into(),
        }
    }

    /// Classify a non-2xx response status and body.
    pub fn from_response(status: u16, body: ErrorBody) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            422 => Self::ValidationFailed {
                message: body.message,
                fields: body.errors.unwrap_or_default(),
            },
            status => Self::ServerFault {
                status,
                message: body.message,
            },
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

/// Failures of infrastructure bootstrap (not of individual requests).
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_auth_statuses() {
        assert_eq!(
            ApiError::from_response(401, ErrorBody::default()),
            ApiError::Unauthorized
        );
        assert_eq!(
            ApiError::from_response(403, ErrorBody::default()),
            ApiError::Unauthorized
        );
    }

    #[test]
    fn classifies_not_found() {
        assert_eq!(
            ApiError::from_response(404, ErrorBody::default()),
            ApiError::NotFound
        );
    }

    #[test]
    fn validation_carries_field_messages() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), vec!["must not be empty".to_string()]);
        let body = ErrorBody {
            message: "validation failed".to_string(),
            status: 422,
            errors: Some(errors),
        };

        match ApiError::from_response(422, body) {
            ApiError::ValidationFailed { fields, .. } => {
                assert_eq!(fields["name"], vec!["must not be empty".to_string()]);
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn five_hundreds_are_server_faults() {
        assert!(matches!(
            ApiError::from_response(503, ErrorBody::default()),
            ApiError::ServerFault { status: 503, .. }
        ));
    }
}
