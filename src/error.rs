use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please enter a URL to summarize")]
    EmptyUrl,

    #[error("Failed to fetch document: {0}")]
    FetchError(String),

    #[error("Error parsing content: {0}")]
    ParseError(String),

    #[error("Unsupported content: {0}")]
    UnsupportedContent(String),

    #[error("LLM processing error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyUrl => StatusCode::BAD_REQUEST,
            AppError::FetchError(_) => StatusCode::BAD_GATEWAY,
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedContent(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::LlmError(_) => StatusCode::BAD_GATEWAY,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-correctable problems are shown as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::EmptyUrl)
    }
}

/// Renders the error as a warning or error envelope with no data.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::from_app_error::<()>(&self).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_the_only_warning() {
        assert!(AppError::EmptyUrl.is_warning());
        assert!(!AppError::FetchError("boom".into()).is_warning());
        assert!(!AppError::LlmError("quota".into()).is_warning());
    }

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(AppError::EmptyUrl.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnsupportedContent("image/png".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::ConfigError("missing".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn into_response_uses_status_code() {
        let response = AppError::ParseError("bad utf-8".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
