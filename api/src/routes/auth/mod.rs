//! Authentication endpoints
//!
//! Login, token refresh, logout, Google sign-in, phone verification, and
//! the signed-in dashboard. Tokens are issued exclusively as HttpOnly
//! cookies; no endpoint ever returns one in a response body.

pub mod cookies;
pub mod dashboard;
pub mod google;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod send_otp;
pub mod verify_otp;
