//! Sender extractor
//!
//! Identifies the caller from the `x-user-id` header. There is no
//! authentication; the header is taken at face value.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::response::ApiError;

/// Header carrying the caller's employee id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity, `None` when the header is absent or empty
#[derive(Debug, Clone, Default)]
pub struct Sender(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Sender
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Self(None));
        };

        let user_id = value
            .to_str()
            .map_err(|_| ApiError::InvalidHeader(format!("{USER_ID_HEADER} must be visible ASCII")))?
            .trim();

        Ok(Self((!user_id.is_empty()).then(|| user_id.to_string())))
    }
}
