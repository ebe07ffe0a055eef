//! Request authentication: schemes and the scheme chain
//!
//! A scheme inspects one kind of credential on a request and yields one of
//! three outcomes: no credential present (neutral), an authenticated user,
//! or a definite rejection. The chain runs schemes in order until one
//! yields a definite result; if every scheme is neutral the request is
//! anonymous. Anonymous is not an error.

pub mod cookie;

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

pub use cookie::CookieJwtScheme;

/// Read-only view of an incoming request's credentials
///
/// Keeps schemes independent of the web framework; the HTTP layer adapts
/// its request type to this trait.
pub trait RequestCredentials {
    /// Value of the named cookie, if present
    fn cookie(&self, name: &str) -> Option<String>;

    /// Value of the named header, if present
    fn header(&self, name: &str) -> Option<String>;
}

/// Identity established for one request
///
/// Owned for the duration of the request only; never cached across requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The resolved user record
    pub user: User,

    /// The validated token the identity was derived from
    pub claims: Claims,
}

/// One strategy in the authentication chain
#[async_trait]
pub trait AuthScheme: Send + Sync {
    /// Attempt to authenticate the request
    ///
    /// `Ok(None)` means this scheme found no credential to act on and the
    /// chain should continue. `Err` is a definite rejection.
    async fn authenticate(
        &self,
        credentials: &(dyn RequestCredentials + Sync),
    ) -> Result<Option<AuthenticatedUser>, DomainError>;

    /// Scheme name for logging
    fn name(&self) -> &'static str;
}

/// Ordered chain of authentication schemes
#[derive(Clone, Default)]
pub struct SchemeChain {
    schemes: Vec<Arc<dyn AuthScheme>>,
}

impl SchemeChain {
    /// Creates an empty chain
    pub fn new() -> Self {
        Self {
            schemes: Vec::new(),
        }
    }

    /// Appends a scheme to the chain
    pub fn with_scheme(mut self, scheme: Arc<dyn AuthScheme>) -> Self {
        self.schemes.push(scheme);
        self
    }

    /// Runs the chain: first definite result wins
    pub async fn authenticate(
        &self,
        credentials: &(dyn RequestCredentials + Sync),
    ) -> Result<Option<AuthenticatedUser>, DomainError> {
        for scheme in &self.schemes {
            match scheme.authenticate(credentials).await? {
                Some(identity) => {
                    tracing::debug!(scheme = scheme.name(), user_id = %identity.user.id, "request authenticated");
                    return Ok(Some(identity));
                }
                None => continue,
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fakes for scheme tests

    use std::collections::HashMap;

    use super::RequestCredentials;

    /// Fake request credentials backed by maps
    #[derive(Default)]
    pub struct FakeCredentials {
        pub cookies: HashMap<String, String>,
        pub headers: HashMap<String, String>,
    }

    impl FakeCredentials {
        pub fn with_cookie(name: &str, value: &str) -> Self {
            let mut cookies = HashMap::new();
            cookies.insert(name.to_string(), value.to_string());
            Self {
                cookies,
                headers: HashMap::new(),
            }
        }
    }

    impl RequestCredentials for FakeCredentials {
        fn cookie(&self, name: &str) -> Option<String> {
            self.cookies.get(name).cloned()
        }

        fn header(&self, name: &str) -> Option<String> {
            self.headers.get(name).cloned()
        }
    }
}
