//! Request and response shapes

pub mod auth;
pub mod profile;
