use derive_more::{Display, Error};
use reqwest::StatusCode;

#[derive(Debug, Display, Error)]
pub(crate) enum ApiError {
    #[display("{message}")]
    Transport { message: String },
    #[display("{}", message.as_deref().unwrap_or("request failed"))]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[display("unexpected response body, {message}")]
    Decode { message: String },
    #[display("No restaurant data to update")]
    MissingEntity,
    #[display("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }

    /// Message reported by the backend, or `fallback` when it did not send one.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiError::MissingEntity => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return ApiError::Decode {
                message: e.to_string(),
            };
        }
        ApiError::Transport {
            message: e.to_string(),
        }
    }
}
