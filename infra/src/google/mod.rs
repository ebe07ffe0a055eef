//! Google ID token verification

use async_trait::async_trait;
use serde::Deserialize;

use crate::InfrastructureError;

/// Identity extracted from a verified Google ID token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    /// Google account subject (stable user id)
    pub subject: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
}

/// Verifies third-party ID tokens and extracts the holder's identity
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, InfrastructureError>;
}

/// Shape of Google's tokeninfo response, subset we care about
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    family_name: String,
    #[serde(default)]
    email_verified: Option<String>,
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifier backed by Google's tokeninfo endpoint
///
/// Google validates the signature and expiry; we additionally check that
/// the token was issued for our OAuth client.
pub struct GoogleTokenVerifier {
    http: reqwest::Client,
    client_id: String,
    endpoint: String,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.into(),
            endpoint: TOKENINFO_URL.to_string(),
        }
    }

    /// Override the verification endpoint, for tests
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, InfrastructureError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| {
                InfrastructureError::ExternalService(format!("tokeninfo request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(InfrastructureError::ExternalService(format!(
                "tokeninfo rejected the token: {}",
                response.status()
            )));
        }

        let info: TokenInfo = response.json().await.map_err(|e| {
            InfrastructureError::ExternalService(format!("invalid tokeninfo response: {}", e))
        })?;

        if info.aud != self.client_id {
            return Err(InfrastructureError::ExternalService(
                "token was issued for a different client".to_string(),
            ));
        }

        if info.email_verified.as_deref() == Some("false") {
            return Err(InfrastructureError::ExternalService(
                "Google account email is not verified".to_string(),
            ));
        }

        Ok(GoogleIdentity {
            subject: info.sub,
            email: info.email,
            given_name: info.given_name,
            family_name: info.family_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokeninfo_parsing() {
        let body = r#"{
            "aud": "client-123.apps.googleusercontent.com",
            "sub": "10987654321",
            "email": "asha@example.com",
            "given_name": "Asha",
            "family_name": "Verma",
            "email_verified": "true",
            "exp": "1714000000"
        }"#;

        let info: TokenInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.aud, "client-123.apps.googleusercontent.com");
        assert_eq!(info.email, "asha@example.com");
        assert_eq!(info.email_verified.as_deref(), Some("true"));
    }

    #[test]
    fn test_tokeninfo_missing_names_default_empty() {
        let body = r#"{"aud": "a", "sub": "1", "email": "x@example.com"}"#;
        let info: TokenInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.given_name, "");
        assert_eq!(info.family_name, "");
    }
}
