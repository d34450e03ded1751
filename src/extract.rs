//! Extractors whose rejections use the API error envelope

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` rejecting with [`AppError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` rejecting with [`AppError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// `axum::extract::Query` rejecting with [`AppError`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
