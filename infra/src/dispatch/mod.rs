//! Background OTP dispatch
//!
//! Delivery work is queued on the request path and executed by a worker
//! task. The worker retries failed deliveries with a fixed backoff and
//! dead-letters jobs that exhaust their attempts; delivery is at-least-once
//! from the caller's point of view.

pub mod channel;
pub mod queue;
pub mod store;

pub use channel::{ConsoleOtpChannel, OtpChannel};
pub use queue::DispatchQueue;
pub use store::InMemoryOtpStore;
