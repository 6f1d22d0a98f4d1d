use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::domain::authorization::UserContext;
use crate::domain::value_objects::UserId;

/// Claims carried by access tokens issued by the sign-in flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid user id in token")]
    InvalidSubject,
}

/// HS256 token verifier shared by every request
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<UserContext, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        let user_id = UserId::new(claims.user_id).map_err(|_| AuthError::InvalidSubject)?;

        Ok(UserContext::new(user_id, claims.name, claims.role))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the caller from a bearer token, if any.
///
/// A valid token puts a [`UserContext`] into the request extensions. Missing or
/// invalid tokens leave the request anonymous; routes that need a caller reject
/// it through [`CurrentUser`].
pub async fn auth_middleware(
    State(verifier): State<Arc<JwtVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match verifier.verify(token) {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => debug!(error = %e, "ignoring unusable bearer token"),
        }
    }

    next.run(request).await
}

/// Extractor for routes that require an authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

/// Extractor for routes where authentication is optional
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserContext>);

impl MaybeUser {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(|u| &u.user_id)
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<UserContext>().cloned()))
    }
}
