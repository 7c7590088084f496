use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response envelope shared by every endpoint: a human-readable `message`,
/// plus `data` on success paths that return resource content.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    pub fn message_only(msg: &str) -> Self {
        ApiResponse {
            message: msg.to_owned(),
            data: None,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_data(msg: &str, data: T) -> Self {
        ApiResponse {
            message: msg.to_owned(),
            data: Some(data),
        }
    }
}

pub fn success<T: Serialize>(msg: &str, data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::with_data(msg, data))).into_response()
}

pub fn created<T: Serialize>(msg: &str, data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::with_data(msg, data))).into_response()
}

pub fn success_message(msg: &str) -> Response {
    (StatusCode::OK, Json(ApiResponse::message_only(msg))).into_response()
}
