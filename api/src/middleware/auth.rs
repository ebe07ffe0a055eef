//! Cookie authentication middleware
//!
//! Runs the core authentication chain against every request it wraps.
//! Three outcomes:
//! - no credential: the request continues anonymously; handlers that
//!   require identity reject it at extraction time
//! - valid credential: the resolved identity is stored in request
//!   extensions for extractors to pick up
//! - invalid credential: the request is rejected immediately with 401
//!   and the verification failure in the body

use std::future::{ready, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;

use te_core::services::auth::{AuthenticatedUser, RequestCredentials, SchemeChain};

use crate::handlers::ApiError;

/// Adapter exposing an actix request's credentials to the core chain
struct ActixCredentials {
    cookies: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl ActixCredentials {
    fn from_request(req: &ServiceRequest) -> Self {
        let cookies = req
            .cookies()
            .map(|jar| {
                jar.iter()
                    .map(|c| (c.name().to_string(), c.value().to_string()))
                    .collect()
            })
            .unwrap_or_default();

        let headers = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        Self { cookies, headers }
    }
}

impl RequestCredentials for ActixCredentials {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }
}

/// Cookie authentication middleware factory
pub struct CookieAuth {
    chain: SchemeChain,
}

impl CookieAuth {
    pub fn new(chain: SchemeChain) -> Self {
        Self { chain }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CookieAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CookieAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CookieAuthMiddleware {
            service: Rc::new(service),
            chain: self.chain.clone(),
        }))
    }
}

pub struct CookieAuthMiddleware<S> {
    service: Rc<S>,
    chain: SchemeChain,
}

impl<S, B> Service<ServiceRequest> for CookieAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let chain = self.chain.clone();

        Box::pin(async move {
            let credentials = ActixCredentials::from_request(&req);

            match chain.authenticate(&credentials).await {
                Ok(Some(identity)) => {
                    req.extensions_mut().insert(AuthContext(identity));
                }
                Ok(None) => {
                    // Anonymous request, continues without identity
                }
                Err(err) => {
                    let response = ApiError::from(err).error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}

/// Identity established by the authentication middleware
///
/// Extracting this from a request without an identity yields 401.
#[derive(Debug, Clone)]
pub struct AuthContext(pub AuthenticatedUser);

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::NotAuthenticated.into());

        ready(result)
    }
}

/// Extractor for endpoints that behave differently for signed-in users
/// but stay open to everyone
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let identity = req.extensions().get::<AuthContext>().map(|ctx| ctx.0.clone());
        ready(Ok(OptionalAuth(identity)))
    }
}
