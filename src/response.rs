//! Response envelope
//!
//! Every JSON body produced by the API has the shape
//! `{ "message": ..., "data": ..., "status": bool, "status_code": u16 }`.
//! The HTTP status of the response always equals `status_code`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::constants::{MESSAGE_PENDING, MESSAGE_SUCCESS};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
    pub status: bool,
    pub status_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` with `status: true`
    pub fn success(data: T) -> Self {
        Self {
            message: MESSAGE_SUCCESS.to_string(),
            data,
            status: true,
            status_code: StatusCode::OK.as_u16(),
        }
    }

    /// `201 Created` with `status: true`
    pub fn created(data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED.as_u16(),
            ..Self::success(data)
        }
    }

    /// `200 OK` with `status: false`: the request was understood but needs
    /// to be repeated with confirmation before anything changes.
    pub fn pending(data: T) -> Self {
        Self {
            message: MESSAGE_PENDING.to_string(),
            data,
            status: false,
            status_code: StatusCode::OK.as_u16(),
        }
    }

    pub fn failure(message: impl Into<String>, data: T, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            data,
            status: false,
            status_code: status.as_u16(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
