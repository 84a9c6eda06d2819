use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` whose rejections come back as a JSON `ValidationError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with the same JSON error shape, e.g. for a malformed id.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Treats an absent field and an empty string the same way.
pub fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}
