//! Domain entities

pub mod otp;
pub mod profile;
pub mod token;
pub mod user;

pub use otp::OtpDispatch;
pub use profile::{ClientProfile, ConsultantProfile};
pub use token::{Claims, TokenPair};
pub use user::{User, UserRole};
