use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{errors::RestError, state::AppState};

/// Organization identified by the request's bearer token.
///
/// Rejects with 401 when the header is missing or the token is unknown.
pub struct Organization(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Organization {
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(RestError::Unauthorized)?;

        if state.is_known_token(token) {
            Ok(Organization(token.to_string()))
        } else {
            Err(RestError::Unauthorized)
        }
    }
}
