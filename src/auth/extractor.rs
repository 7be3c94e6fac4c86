//! Stub identity extractor
//!
//! Token verification lives outside this service; the gateway resolves
//! the session and forwards the user as `x-user-*` headers. This
//! extractor only reassembles that record.
//!
//! Headers: `x-user-id` (UUID), `x-user-name`, `x-user-type`
//! (`customer` | `vendor`), and optionally `x-user-company`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::domain::{User, UserType};
use crate::error::ErrorResponse;

pub const X_USER_ID: &str = "x-user-id";
pub const X_USER_NAME: &str = "x-user-name";
pub const X_USER_TYPE: &str = "x-user-type";
pub const X_USER_COMPANY: &str = "x-user-company";

/// Extractor that requires a resolved user on the request.
///
/// Example:
/// ```ignore
/// async fn protected_route(user: CurrentUser) -> impl IntoResponse {
///     format!("Hello, {}", user.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingIdentity,
    InvalidIdentity(&'static str),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            AuthError::MissingIdentity => "Missing user identity headers",
            AuthError::InvalidIdentity(detail) => detail,
        };

        let body = ErrorResponse {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            request_id: None,
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}

fn user_from_headers(headers: &HeaderMap) -> Result<User, AuthError> {
    let id = header_str(headers, X_USER_ID).ok_or(AuthError::MissingIdentity)?;
    let id = Uuid::parse_str(id).map_err(|_| AuthError::InvalidIdentity("Invalid user id"))?;

    let name = header_str(headers, X_USER_NAME)
        .ok_or(AuthError::MissingIdentity)?
        .to_string();

    let user_type = match header_str(headers, X_USER_TYPE).ok_or(AuthError::MissingIdentity)? {
        "customer" => UserType::Customer,
        "vendor" => UserType::Vendor,
        _ => return Err(AuthError::InvalidIdentity("Invalid user type")),
    };

    let company = header_str(headers, X_USER_COMPANY)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(User {
        id,
        name,
        user_type,
        company,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_from_headers(&parts.headers).map(CurrentUser)
    }
}
