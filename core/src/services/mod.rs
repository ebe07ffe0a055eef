//! Business services

pub mod auth;
pub mod token;
pub mod verification;

pub use auth::{AuthScheme, AuthenticatedUser, CookieJwtScheme, RequestCredentials, SchemeChain};
pub use token::TokenService;
pub use verification::{CodeRequested, OtpQueue, OtpRecord, OtpStore, VerificationService};
