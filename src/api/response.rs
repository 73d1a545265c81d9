use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

use crate::error::AppError;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    pub status: String,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

fn envelope<T>(
    status: StatusCode,
    label: &str,
    data: Option<T>,
    message: Option<String>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    let meta = ResponseMeta {
        status: label.to_string(),
        status_code: status.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        message,
    };

    (status, Json(ApiResponse { data, meta }))
}

pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    envelope(StatusCode::OK, "success", Some(data), None)
}

pub fn warning<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    envelope(status, "warning", None, Some(message))
}

pub fn error<T>(status: StatusCode, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    envelope(status, "error", None, Some(message))
}

/// Maps a pipeline failure onto the warning or error envelope.
pub fn from_app_error<T>(err: &AppError) -> (StatusCode, Json<ApiResponse<T>>) {
    if err.is_warning() {
        warning(err.status_code(), err.to_string())
    } else {
        error(err.status_code(), err.to_string())
    }
}
