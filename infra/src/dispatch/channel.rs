//! OTP delivery channels

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use te_core::domain::entities::otp::OtpDispatch;

use crate::InfrastructureError;

/// One way of getting a verification code to a phone
///
/// A channel performs a single delivery attempt and reports the provider's
/// message id; retries are the queue's job, not the channel's.
#[async_trait]
pub trait OtpChannel: Send + Sync {
    /// Attempt to deliver the code once
    async fn deliver(&self, dispatch: &OtpDispatch) -> Result<String, InfrastructureError>;

    /// Channel name for logging
    fn name(&self) -> &'static str;
}

/// Console delivery channel for development
///
/// Writes the code to the log instead of sending anything. The full phone
/// number and code appear in the output so a developer can complete the
/// verification flow locally.
#[derive(Clone)]
pub struct ConsoleOtpChannel {
    delivered: Arc<AtomicU64>,
    fail_first: Arc<AtomicU64>,
}

impl ConsoleOtpChannel {
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(AtomicU64::new(0)),
            fail_first: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Fail the next `n` delivery attempts, for exercising retry behavior
    pub fn fail_next(&self, n: u64) {
        self.fail_first.store(n, Ordering::SeqCst);
    }

    /// Total successful deliveries
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleOtpChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpChannel for ConsoleOtpChannel {
    async fn deliver(&self, dispatch: &OtpDispatch) -> Result<String, InfrastructureError> {
        loop {
            let remaining = self.fail_first.load(Ordering::SeqCst);
            if remaining == 0 {
                break;
            }
            if self
                .fail_first
                .compare_exchange(remaining, remaining - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return Err(InfrastructureError::Dispatch(
                    "simulated delivery failure".to_string(),
                ));
            }
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.delivered.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            target: "otp_dispatch",
            channel = "console",
            message = count,
            message_id = %message_id,
            "Sending OTP {} to {}",
            dispatch.code,
            dispatch.phone_number
        );
        Ok(message_id)
    }

    fn name(&self) -> &'static str {
        "console"
    }
}
