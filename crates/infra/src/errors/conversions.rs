//! Error newtype that keeps conversions on the infrastructure side.

use quorum_domain::QuorumError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub QuorumError);

impl From<InfraError> for QuorumError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<QuorumError> for InfraError {
    fn from(value: QuorumError) -> Self {
        InfraError(value)
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → QuorumError */
/* -------------------------------------------------------------------------- */

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        if value.is_timeout() {
            return InfraError(QuorumError::Network("HTTP request timed out".into()));
        }

        if value.is_connect() {
            return InfraError(QuorumError::Network("HTTP connection failure".into()));
        }

        if let Some(status) = value.status() {
            return InfraError(status_error(status));
        }

        InfraError(QuorumError::Network(value.to_string()))
    }
}

/// Map an HTTP status to the domain error taxonomy.
pub fn status_error(status: reqwest::StatusCode) -> QuorumError {
    let code = status.as_u16();
    let message =
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

    match code {
        401 | 403 => QuorumError::Auth(message),
        404 => QuorumError::NotFound(message),
        429 => QuorumError::Network(message),
        400..=499 => QuorumError::InvalidInput(message),
        _ => QuorumError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → QuorumError */
/* -------------------------------------------------------------------------- */

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::NotFound => {
                InfraError(QuorumError::NotFound(value.to_string()))
            }
            _ => InfraError(QuorumError::Internal(format!("I/O error: {value}"))),
        }
    }
}
