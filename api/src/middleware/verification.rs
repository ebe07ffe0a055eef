//! Phone-verification gate
//!
//! Signed-in users must verify their phone number before touching
//! business endpoints. The auth endpoints themselves stay reachable so
//! the user can actually complete verification, and staff accounts are
//! exempt. Anonymous requests pass through; identity enforcement is the
//! extractors' job, not this gate's.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures_util::future::LocalBoxFuture;

use te_core::domain::entities::user::UserRole;
use te_core::errors::AuthError;

use crate::handlers::ApiError;
use crate::middleware::auth::AuthContext;

/// Path prefixes reachable without a verified phone
///
/// The profile endpoint stays open so a new client can fill in their
/// details (including the phone number) before verification.
const EXEMPT_PREFIXES: &[&str] = &["/api/auth/", "/api/client/profile", "/health", "/media/"];

/// Phone-verification gate factory
#[derive(Default)]
pub struct PhoneVerificationGate;

impl PhoneVerificationGate {
    pub fn new() -> Self {
        Self
    }
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

impl<S, B> Transform<S, ServiceRequest> for PhoneVerificationGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PhoneVerificationGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PhoneVerificationGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct PhoneVerificationGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for PhoneVerificationGateMiddleware<S>
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

        Box::pin(async move {
            let blocked = {
                let extensions = req.extensions();
                match extensions.get::<AuthContext>() {
                    Some(AuthContext(identity)) => {
                        let user = &identity.user;
                        user.role != UserRole::Admin
                            && !user.is_staff
                            && !user.is_phone_verified
                            && !is_exempt(req.path())
                    }
                    None => false,
                }
            };

            if blocked {
                log::debug!("blocking unverified user from {}", req.path());
                let response =
                    ApiError::from(AuthError::PhoneVerificationRequired).error_response();
                return Ok(req.into_response(response).map_into_right_body());
            }

            service
                .call(req)
                .await
                .map(|res| res.map_into_left_body())
        })
    }
}
