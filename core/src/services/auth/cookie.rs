//! Cookie-borne JWT authentication scheme

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::{AuthScheme, AuthenticatedUser, RequestCredentials};

/// Authenticates requests from a JWT carried in an HttpOnly cookie
///
/// A request without the cookie is anonymous, not rejected; browsers hit
/// public endpoints without credentials all the time. A cookie that is
/// present but fails verification is a definite rejection, and the
/// verification failure is kept as the error source so the response can
/// say why the token was refused.
pub struct CookieJwtScheme<U: UserRepository> {
    token_service: Arc<TokenService>,
    users: Arc<U>,
    cookie_name: String,
}

impl<U: UserRepository> CookieJwtScheme<U> {
    pub fn new(token_service: Arc<TokenService>, users: Arc<U>, cookie_name: impl Into<String>) -> Self {
        Self {
            token_service,
            users,
            cookie_name: cookie_name.into(),
        }
    }
}

#[async_trait]
impl<U: UserRepository> AuthScheme for CookieJwtScheme<U> {
    async fn authenticate(
        &self,
        credentials: &(dyn RequestCredentials + Sync),
    ) -> Result<Option<AuthenticatedUser>, DomainError> {
        let token = match credentials.cookie(&self.cookie_name) {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };

        let claims = self
            .token_service
            .verify_access_token(&token)
            .map_err(AuthError::InvalidToken)?;

        let user_id = claims
            .user_id()
            .map_err(|_| AuthError::InvalidToken(TokenError::InvalidClaims))?;

        // The token may outlive the account it was issued for.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(Some(AuthenticatedUser { user, claims }))
    }

    fn name(&self) -> &'static str {
        "cookie_jwt"
    }
}
