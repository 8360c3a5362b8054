//! Error types for the PandaDoc connector.

use thiserror::Error;
use xavyo_connector::error::ConnectorError;

/// Result type alias using `PandaDocError`.
pub type PandaDocResult<T> = Result<T, PandaDocError>;

/// Errors that can occur when syncing from PandaDoc.
#[derive(Debug, Error)]
pub enum PandaDocError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// PandaDoc API returned a non-success status.
    #[error("PandaDoc API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Page token carried something other than a page number.
    #[error("Invalid page number in page token: {0}")]
    InvalidPageNumber(String),

    /// A membership references a workspace missing from the workspace list.
    #[error("provided workspace id {0} does not exist")]
    WorkspaceNotFound(String),

    /// Error raised by the connector framework (page token handling).
    #[error(transparent)]
    Framework(#[from] ConnectorError),
}

impl From<PandaDocError> for ConnectorError {
    fn from(err: PandaDocError) -> Self {
        match err {
            PandaDocError::Config(message) => ConnectorError::InvalidConfiguration { message },
            PandaDocError::Url(e) => ConnectorError::InvalidConfiguration {
                message: e.to_string(),
            },
            PandaDocError::Api { status: 401, .. } => ConnectorError::AuthenticationFailed,
            PandaDocError::Api { status: 403, message } => ConnectorError::AuthorizationFailed {
                operation: message,
            },
            PandaDocError::Api { status, message } if status >= 500 => {
                ConnectorError::TargetUnavailable {
                    message: format!("{status}: {message}"),
                }
            }
            e @ PandaDocError::Api { .. } => ConnectorError::operation_failed(e.to_string()),
            PandaDocError::Http(e) if e.is_timeout() || e.is_connect() => {
                ConnectorError::network_with_source("PandaDoc request failed", e)
            }
            PandaDocError::Http(e) => {
                ConnectorError::operation_failed_with_source("PandaDoc request failed", e)
            }
            PandaDocError::Json(e) => ConnectorError::InvalidData {
                message: e.to_string(),
            },
            e @ PandaDocError::InvalidPageNumber(_) => {
                ConnectorError::invalid_page_token(e.to_string())
            }
            e @ PandaDocError::WorkspaceNotFound(_) => ConnectorError::ObjectNotFound {
                identifier: e.to_string(),
            },
            PandaDocError::Framework(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let err: ConnectorError = PandaDocError::Api {
            status: 401,
            message: "bad key".into(),
        }
        .into();
        assert_eq!(err.error_code(), "AUTH_FAILED");

        let err: ConnectorError = PandaDocError::Api {
            status: 503,
            message: "maintenance".into(),
        }
        .into();
        assert!(err.is_transient());

        let err: ConnectorError = PandaDocError::Api {
            status: 404,
            message: "missing".into(),
        }
        .into();
        assert_eq!(err.error_code(), "OPERATION_FAILED");
    }

    #[test]
    fn test_workspace_not_found_message() {
        let err = PandaDocError::WorkspaceNotFound("ws-9".into());
        assert_eq!(err.to_string(), "provided workspace id ws-9 does not exist");

        let err: ConnectorError = err.into();
        assert_eq!(err.error_code(), "OBJECT_NOT_FOUND");
        assert!(err.to_string().contains("ws-9"));
    }

    #[test]
    fn test_framework_error_passes_through() {
        let err: ConnectorError =
            PandaDocError::Framework(ConnectorError::invalid_page_token("bad")).into();
        assert_eq!(err.error_code(), "INVALID_PAGE_TOKEN");
        assert_eq!(err.to_string(), "invalid page token: bad");
    }
}
