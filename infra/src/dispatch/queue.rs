//! Dispatch queue and worker

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use te_core::domain::entities::otp::OtpDispatch;
use te_core::errors::DomainError;
use te_core::services::verification::OtpQueue;
use te_shared::config::DispatchConfig;

use super::channel::OtpChannel;

/// Queue handle for submitting OTP dispatch jobs
///
/// Enqueue never waits on delivery: jobs go into an unbounded channel and
/// a single worker task drains it. Jobs accepted before shutdown are
/// delivered or dead-lettered; a full process crash loses whatever is
/// still in the channel, which callers tolerate by letting users request
/// another code.
#[derive(Clone)]
pub struct DispatchQueue {
    tx: mpsc::UnboundedSender<OtpDispatch>,
}

impl DispatchQueue {
    /// Start the worker and return a handle for enqueuing
    pub fn spawn(channel: Arc<dyn OtpChannel>, config: DispatchConfig) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(rx, channel, config));
        (Self { tx }, worker)
    }

    /// Number of delivery attempts a worker makes, given configuration
    fn attempts(config: &DispatchConfig) -> u32 {
        config.max_attempts.max(1)
    }
}

#[async_trait]
impl OtpQueue for DispatchQueue {
    async fn enqueue(&self, dispatch: OtpDispatch) -> Result<(), DomainError> {
        self.tx
            .send(dispatch)
            .map_err(|_| DomainError::Dispatch("dispatch worker is not running".to_string()))
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<OtpDispatch>,
    channel: Arc<dyn OtpChannel>,
    config: DispatchConfig,
) {
    info!(channel = channel.name(), "OTP dispatch worker started");

    let attempts = DispatchQueue::attempts(&config);
    let backoff = Duration::from_millis(config.retry_backoff_ms);
    let timeout = Duration::from_secs(config.delivery_timeout_secs);

    while let Some(job) = rx.recv().await {
        deliver_with_retry(channel.as_ref(), &job, attempts, backoff, timeout).await;
    }

    info!("OTP dispatch worker stopped");
}

async fn deliver_with_retry(
    channel: &dyn OtpChannel,
    job: &OtpDispatch,
    attempts: u32,
    backoff: Duration,
    timeout: Duration,
) {
    for attempt in 1..=attempts {
        let result = tokio::time::timeout(timeout, channel.deliver(job)).await;

        match result {
            Ok(Ok(message_id)) => {
                info!(
                    phone = %job.masked_phone(),
                    attempt,
                    message_id = %message_id,
                    "OTP delivered"
                );
                return;
            }
            Ok(Err(e)) => {
                warn!(
                    phone = %job.masked_phone(),
                    attempt,
                    "OTP delivery failed: {}",
                    e
                );
            }
            Err(_) => {
                warn!(
                    phone = %job.masked_phone(),
                    attempt,
                    "OTP delivery timed out after {:?}",
                    timeout
                );
            }
        }

        if attempt < attempts {
            tokio::time::sleep(backoff).await;
        }
    }

    // Dead letter: the job is dropped after logging, never retried again
    error!(
        phone = %job.masked_phone(),
        attempts,
        "OTP delivery dead-lettered after exhausting retries"
    );
}
