//! Error types for receiptdesk-client

use receiptdesk_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from server: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Build a status error from a failed response body.
    ///
    /// The body is read as JSON and its `error` field, then its `message`
    /// field, becomes the message. Anything else gets a generic one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["error", "message"].iter().find_map(|field| {
                    value
                        .get(*field)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(error) => error.status().map(|s| s.as_u16()),
            ApiError::Decode { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// 404, 400 and 401 mean "nothing configured yet" for optional
    /// resources and are not worth a notification
    pub fn is_benign(&self) -> bool {
        matches!(self.status(), Some(404) | Some(400) | Some(401))
    }
}

impl From<ApiError> for CoreError {
    fn from(error: ApiError) -> Self {
        CoreError::RemoteError {
            message: error.to_string(),
        }
    }
}

/// Result type with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_prefers_error_field() {
        let error = ApiError::from_response(400, r#"{"error":"EIN is invalid","message":"ignored"}"#);
        assert_eq!(error.to_string(), "EIN is invalid");
        assert_eq!(error.status(), Some(400));
    }

    #[test]
    fn test_message_falls_back_to_message_field() {
        let error = ApiError::from_response(500, r#"{"message":"Database offline"}"#);
        assert_eq!(error.to_string(), "Database offline");
    }

    #[test]
    fn test_unparseable_body_uses_generic_message() {
        let error = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(error.to_string(), "Request failed with status 502");

        let error = ApiError::from_response(500, r#"{"detail":"x"}"#);
        assert_eq!(error.to_string(), "Request failed with status 500");
    }

    #[test]
    fn test_benign_statuses() {
        assert!(ApiError::from_response(404, "").is_benign());
        assert!(ApiError::from_response(400, "").is_benign());
        assert!(ApiError::from_response(401, "").is_benign());
        assert!(!ApiError::from_response(500, "").is_benign());
        assert!(!ApiError::Decode { message: "x".to_string() }.is_benign());
    }

    #[test]
    fn test_converts_to_remote_error() {
        let error: CoreError = ApiError::from_response(409, r#"{"error":"Already exists"}"#).into();
        assert!(matches!(error, CoreError::RemoteError { .. }));
        assert_eq!(error.to_string(), "Already exists");
    }
}
