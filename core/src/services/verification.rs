//! Phone verification: code generation, storage, and queued delivery

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use te_shared::config::DispatchConfig;
use te_shared::utils::phone::{is_valid_phone, normalize_phone_number};

use crate::domain::entities::otp::OtpDispatch;
use crate::errors::{AuthError, DomainError, ValidationError};

/// Sink that accepts OTP delivery jobs without blocking the caller
///
/// Implementations hand the job to a background worker and return
/// immediately; delivery happens (or fails) off the request path.
#[async_trait]
pub trait OtpQueue: Send + Sync {
    /// Submit a dispatch job for background delivery
    async fn enqueue(&self, dispatch: OtpDispatch) -> Result<(), DomainError>;
}

/// Stored verification state for one phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    /// Code awaiting verification
    pub code: String,
    /// When the current code was issued
    pub created_at: DateTime<Utc>,
    /// Wrong-code attempts against the current code
    pub verify_attempts: u32,
    /// Issue times of recent codes, for the hourly resend cap
    pub send_times: Vec<DateTime<Utc>>,
}

/// Keyed storage for pending verification codes
///
/// Records live for the code TTL at most; the service removes them on
/// successful verification or when the attempt budget is spent.
#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError>;
    async fn put(&self, phone: &str, record: OtpRecord) -> Result<(), DomainError>;
    async fn remove(&self, phone: &str) -> Result<(), DomainError>;
}

/// Outcome of a verification code request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequested {
    /// Destination with all but the trailing digits hidden
    pub masked_phone: String,
    /// Seconds the client should wait before asking for another code
    pub resend_after: u64,
}

/// Orchestrates phone verification
///
/// Validates the destination, generates a numeric code, stores it with a
/// TTL, and enqueues the delivery job. Resends are throttled per phone
/// (cooldown plus an hourly cap) and verification burns a bounded attempt
/// budget. The code itself never appears in the HTTP response.
pub struct VerificationService<Q: OtpQueue> {
    queue: Q,
    store: Arc<dyn OtpStore>,
    config: DispatchConfig,
}

impl<Q: OtpQueue> VerificationService<Q> {
    pub fn new(queue: Q, store: Arc<dyn OtpStore>, config: DispatchConfig) -> Self {
        Self {
            queue,
            store,
            config,
        }
    }

    /// Request a verification code for a phone number
    ///
    /// Returns as soon as the code is stored and the job is queued;
    /// delivery is asynchronous. Requests inside the cooldown window or
    /// over the hourly cap are rejected without generating a code.
    pub async fn request_code(&self, phone_number: &str) -> Result<CodeRequested, DomainError> {
        let phone = normalize_phone_number(phone_number);
        if !is_valid_phone(&phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone_number".to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let mut send_times = match self.store.get(&phone).await? {
            Some(record) => {
                if let Some(last_sent) = record.send_times.last() {
                    let elapsed = (now - *last_sent).num_seconds().max(0) as u64;
                    if elapsed < self.config.resend_after_secs {
                        return Err(AuthError::OtpCooldown {
                            retry_after: self.config.resend_after_secs - elapsed,
                        }
                        .into());
                    }
                }
                record.send_times
            }
            None => Vec::new(),
        };

        send_times.retain(|sent| now - *sent < Duration::hours(1));
        if send_times.len() >= self.config.max_sends_per_hour as usize {
            return Err(AuthError::OtpResendLimit.into());
        }
        send_times.push(now);

        let code = self.generate_code();
        let dispatch = OtpDispatch::new(phone.clone(), code.clone());
        let masked_phone = dispatch.masked_phone();

        self.store
            .put(
                &phone,
                OtpRecord {
                    code,
                    created_at: now,
                    verify_attempts: 0,
                    send_times,
                },
            )
            .await?;

        tracing::info!(phone = %masked_phone, "verification code requested");
        self.queue.enqueue(dispatch).await?;

        Ok(CodeRequested {
            masked_phone,
            resend_after: self.config.resend_after_secs,
        })
    }

    /// Check a submitted code against the stored one
    ///
    /// A match consumes the record; a mismatch burns one attempt and
    /// reports how many remain. Expired or attempt-exhausted codes force
    /// the caller to request a new one.
    pub async fn verify_code(&self, phone_number: &str, code: &str) -> Result<(), DomainError> {
        let phone = normalize_phone_number(phone_number);
        let mut record = self
            .store
            .get(&phone)
            .await?
            .ok_or(AuthError::OtpExpired)?;

        let now = Utc::now();
        if now - record.created_at > Duration::seconds(self.config.code_ttl_secs as i64) {
            self.store.remove(&phone).await?;
            return Err(AuthError::OtpExpired.into());
        }

        if record.verify_attempts >= self.config.max_verify_attempts {
            self.store.remove(&phone).await?;
            return Err(AuthError::OtpAttemptsExceeded.into());
        }

        if record.code != code {
            record.verify_attempts += 1;
            let remaining = self.config.max_verify_attempts - record.verify_attempts;
            if remaining == 0 {
                self.store.remove(&phone).await?;
                return Err(AuthError::OtpAttemptsExceeded.into());
            }
            self.store.put(&phone, record).await?;
            return Err(AuthError::OtpInvalid { remaining }.into());
        }

        self.store.remove(&phone).await?;
        Ok(())
    }

    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.config.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10)))
            .collect()
    }
}
