/**
 * Request Extractors
 *
 * Thin wrappers over Axum's `Json`, `Path` and `Query` whose rejections are
 * `BackendError`, so a malformed body or id produces the same JSON error
 * shape as every other failure.
 */

use axum::extract::{FromRequest, FromRequestParts};

use crate::backend::error::BackendError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BackendError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BackendError))]
pub struct ApiQuery<T>(pub T);
