use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,

    /// 400 responses carry a human readable reason from the backend.
    #[error("{0}")]
    BadRequest(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("API request failed with status: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Maps a non-success response to an error. `body` is the raw response text.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ApiError::BadRequest(error_message(&body)),
            StatusCode::UNAUTHORIZED => ApiError::SessionExpired,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => ApiError::Status { status, body },
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }
}

/// The backend answers 400s with either a bare JSON string, an object with a
/// `detail` key, or a field -> messages object from serializer validation.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => {
            if let Some(detail) = map.get("detail").and_then(|d| d.as_str()) {
                return detail.to_string();
            }
            map.iter()
                .map(|(field, msgs)| match msgs {
                    serde_json::Value::Array(items) => {
                        let joined = items
                            .iter()
                            .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                            .collect::<Vec<_>>()
                            .join(" ");
                        format!("{}: {}", field, joined)
                    }
                    serde_json::Value::String(s) => format!("{}: {}", field, s),
                    other => format!("{}: {}", field, other),
                })
                .collect::<Vec<_>>()
                .join("; ")
        }
        _ if trimmed.is_empty() => "Bad request".to_string(),
        _ => trimmed.to_string(),
    }
}
