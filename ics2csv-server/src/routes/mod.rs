pub mod convert;
pub mod health;

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ics2csv_core::ConvertError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Convert pipeline and upload errors to HTTP responses
pub enum AppError {
    Convert(ConvertError),
    Multipart(MultipartError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Convert(ConvertError::NoFile | ConvertError::EmptyContent) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Convert(ConvertError::Decode(_) | ConvertError::NoEvents) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Convert(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Multipart(e) => e.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Convert(e) => e.user_message(),
            AppError::Multipart(e) => e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            match &self {
                AppError::Convert(e) => tracing::error!(error = ?e, "conversion failed"),
                AppError::Multipart(e) => tracing::error!(error = ?e, "could not read upload"),
            }
        } else {
            tracing::info!(%status, %message, "conversion rejected");
        }

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        Self::Convert(err)
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err)
    }
}
