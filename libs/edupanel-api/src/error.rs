use reqwest::StatusCode;
use serde::Deserialize;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("session expired or not authorized, please log in again")]
    Unauthorized,
    #[error("{message} (HTTP {status})")]
    Http { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Backend-provided message for HTTP errors.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Pulls the human message out of an error body: `message` (string or list
/// of strings), then `error`, then the status reason.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let from_message = parsed.as_ref().and_then(|b| match &b.message {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    });

    from_message
        .or_else(|| parsed.and_then(|b| b.error).filter(|e| !e.trim().is_empty()))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && !trimmed.starts_with('{') && trimmed.len() <= 200)
                .then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_string() {
        let msg = error_message(StatusCode::BAD_REQUEST, r#"{"message":"Price option not found","statusCode":400}"#);
        assert_eq!(msg, "Price option not found");
    }

    #[test]
    fn message_list_is_joined() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":["name.uz should not be empty","duration must be a number"]}"#,
        );
        assert_eq!(msg, "name.uz should not be empty; duration must be a number");
    }

    #[test]
    fn falls_back_to_error_then_reason() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error":"Not Found"}"#),
            "Not Found"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
    }
}
