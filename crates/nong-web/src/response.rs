use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nong_core::AppError;
use nong_translator::TranslateError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Error body shared by every route: `{"success": false, "error": ...}`
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Session(_)
            | AppError::InvalidUserInput(_)
            | AppError::TranslationUnavailable(TranslateError::UnsupportedLanguage(_)) => {
                Self::bad_request(err.to_string())
            }
            AppError::SpeechUnavailable => Self::internal("Failed to generate audio"),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use nong_core::SessionError;

    use super::*;

    #[test]
    fn session_errors_are_client_errors() {
        let err = ApiError::from(AppError::Session(SessionError::EmptyQuiz));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(AppError::Session(SessionError::InsufficientVocabulary {
            required: 4,
            available: 2,
        }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn remote_failures_are_server_errors() {
        assert_eq!(
            ApiError::from(AppError::SpeechUnavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let err = ApiError::from(AppError::TranslationUnavailable(
            nong_translator::TranslateError::EmptyResponse,
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Translation unavailable: Empty response from provider");
    }

    #[test]
    fn unsupported_language_is_a_client_error() {
        let err = ApiError::from(AppError::TranslationUnavailable(
            TranslateError::UnsupportedLanguage(nong_core::SourceLanguage::English),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Translation unavailable: Unsupported source language: english");
    }
}
