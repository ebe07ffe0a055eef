//! JWT token service

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use te_shared::config::auth::JwtConfig;

use crate::domain::entities::token::{Claims, TokenPair, TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use crate::domain::entities::user::User;
use crate::errors::TokenError;

/// Service for issuing and verifying JWT access and refresh tokens
///
/// Both token kinds are self-contained JWTs signed with the same key; they
/// differ in lifetime and in the `token_type` claim. Nothing is stored
/// server side, so "logout" is the client discarding its cookies.
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from JWT configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues an access + refresh token pair for a user
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(user)?,
            access_expires_in: self.config.access_token_expiry,
            refresh_expires_in: self.config.refresh_token_expiry,
        })
    }

    /// Issues a fresh access token for a user
    pub fn issue_access_token(&self, user: &User) -> Result<String, TokenError> {
        let claims = Claims::for_user(
            user,
            TOKEN_TYPE_ACCESS,
            self.config.access_token_expiry,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode(&claims)
    }

    /// Issues a refresh token for a user
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        let claims = Claims::for_user(
            user,
            TOKEN_TYPE_REFRESH,
            self.config.refresh_token_expiry,
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode(&claims)
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        if !claims.is_access() {
            return Err(TokenError::WrongTokenType {
                expected: TOKEN_TYPE_ACCESS,
            });
        }
        Ok(claims)
    }

    /// Verifies a refresh token and returns its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        if !claims.is_refresh() {
            return Err(TokenError::WrongTokenType {
                expected: TOKEN_TYPE_REFRESH,
            });
        }
        Ok(claims)
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key).map_err(|_| TokenError::TokenGenerationFailed)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer
                | jsonwebtoken::errors::ErrorKind::InvalidAudience => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            }
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::UserRole;

    fn service() -> TokenService {
        TokenService::new(JwtConfig::new("test-secret"))
    }

    fn sample_user() -> User {
        User::new_client("asha", "asha@example.com", "Asha", "Verma")
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let service = service();
        let user = sample_user();

        let token = service.issue_access_token(&user).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.user_role, UserRole::Client);
        assert_eq!(claims.full_name, "Asha Verma");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = service();
        let user = sample_user();

        let refresh = service.issue_refresh_token(&user).unwrap();
        let err = service.verify_access_token(&refresh).unwrap_err();
        assert!(matches!(err, TokenError::WrongTokenType { expected: "access" }));

        // and the other way around
        let access = service.issue_access_token(&user).unwrap();
        let err = service.verify_refresh_token(&access).unwrap_err();
        assert!(matches!(err, TokenError::WrongTokenType { expected: "refresh" }));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let other = TokenService::new(JwtConfig::new("other-secret"));
        let user = sample_user();

        let token = other.issue_access_token(&user).unwrap();
        let err = service.verify_access_token(&token).unwrap_err();
        assert_eq!(err, TokenError::InvalidSignature);
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = JwtConfig::new("test-secret");
        // Past the default decode leeway
        config.access_token_expiry = -3600;
        let service = TokenService::new(config);
        let user = sample_user();

        let token = service.issue_access_token(&user).unwrap();
        let err = TokenService::new(JwtConfig::new("test-secret"))
            .verify_access_token(&token)
            .unwrap_err();
        assert_eq!(err, TokenError::TokenExpired);
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut config = JwtConfig::new("test-secret");
        config.issuer = String::from("someone-else");
        let other = TokenService::new(config);
        let user = sample_user();

        let token = other.issue_access_token(&user).unwrap();
        let err = service().verify_access_token(&token).unwrap_err();
        assert_eq!(err, TokenError::InvalidClaims);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = service().verify_access_token("not.a.jwt").unwrap_err();
        assert_eq!(err, TokenError::InvalidTokenFormat);
    }
}
