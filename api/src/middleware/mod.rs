//! actix-web middleware: cookie authentication, the phone-verification
//! gate, CORS setup, and security headers

pub mod auth;
pub mod cors;
pub mod security;
pub mod verification;

pub use auth::{AuthContext, CookieAuth, OptionalAuth};
pub use security::SecurityHeaders;
pub use verification::PhoneVerificationGate;
