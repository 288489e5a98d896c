use axum::extract::FromRequest;

use crate::errors::ApiError;

/// `axum::Json` whose rejections render as `{"error": ..}` with status 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
