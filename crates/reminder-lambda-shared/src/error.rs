//! Two-tier error taxonomy for controllers.
//!
//! Controllers and the validator raise; the handler boundary catches,
//! classifies, logs, and renders. The classification is a closed sum type so
//! the boundary can match it exhaustively:
//!
//! - [`ExternalError`]: caller-correctable. Status and message reach the caller
//!   verbatim.
//! - [`InternalError`]: unexpected. Logged with full detail; the caller only
//!   sees a generic 500.
//! - anything else ([`ControllerError::Unexpected`]): treated like
//!   [`InternalError`].

use http::StatusCode;
use thiserror::Error;

use reminder_lib::Error as LibError;

/// Body returned for every internal failure.
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal Server Error";

/// A failure whose status and message are safe to show to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status_code} {message}")]
pub struct ExternalError {
    status_code: u16,
    message: String,
}

impl ExternalError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 400 for a route invoked without one of its path parameters.
    pub fn missing_path_parameter(name: &str) -> Self {
        Self::bad_request(format!("Path must contain path parameter `{name}`."))
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A failure whose detail must stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    message: String,
}

impl InternalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every way a controller invocation can fail.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    External(#[from] ExternalError),

    #[error(transparent)]
    Internal(#[from] InternalError),

    /// Any failure that was not classified by the controller.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ControllerError {
    /// Status code the handler boundary will answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ControllerError::External(err) => err.status_code(),
            ControllerError::Internal(_) | ControllerError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.as_u16()
            }
        }
    }

    /// Whether the detail of this error may be shown to the caller.
    pub fn is_external(&self) -> bool {
        matches!(self, ControllerError::External(_))
    }
}

/// Missing records are the caller's problem; everything else is ours.
impl From<LibError> for ControllerError {
    fn from(error: LibError) -> Self {
        if error.is_not_found() {
            ExternalError::not_found(error.to_string()).into()
        } else {
            InternalError::new(error.to_string()).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_error_keeps_status_and_message() {
        let err = ExternalError::new(StatusCode::FORBIDDEN, "no access");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message(), "no access");
    }

    #[test]
    fn missing_path_parameter_message() {
        let err = ExternalError::missing_path_parameter("id");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Path must contain path parameter `id`.");
    }

    #[test]
    fn internal_and_unexpected_map_to_500() {
        let internal: ControllerError = InternalError::new("db down").into();
        let unexpected: ControllerError = anyhow::anyhow!("boom").into();
        assert_eq!(internal.status_code(), 500);
        assert_eq!(unexpected.status_code(), 500);
        assert!(!internal.is_external());
        assert!(!unexpected.is_external());
    }

    #[test]
    fn lib_not_found_becomes_external_404() {
        let err: ControllerError = LibError::ReminderNotFound {
            id: "r-1".to_string(),
        }
        .into();
        assert!(err.is_external());
        assert_eq!(err.status_code(), 404);
        assert!(err.to_string().contains("r-1"));
    }

    #[test]
    fn other_lib_errors_become_internal() {
        let err: ControllerError = LibError::StorePoisoned.into();
        assert!(matches!(err, ControllerError::Internal(_)));

        let err: ControllerError = LibError::MissingConfig {
            key: "REMINDER_TABLE".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), 500);
    }
}
