//! Caller identity.
//!
//! Authentication happens upstream; the gateway forwards the resolved user id
//! in a header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use readoku_core::UserId;

use crate::api_error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated user resolved from the `X-User-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("missing user identity".to_owned()))?;
        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(|id| Self(UserId(id)))
            .ok_or_else(|| ApiError::Unauthorized("invalid user identity".to_owned()))
    }
}
