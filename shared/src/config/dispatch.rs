//! OTP dispatch queue configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OTP dispatch queue and its delivery channel
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Delivery channel ("console" is the development channel)
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Maximum delivery attempts per job before dead-lettering
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between delivery attempts in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Per-attempt delivery timeout in seconds
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,

    /// Generated OTP code length
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a client must wait before requesting another code
    #[serde(default = "default_resend_after_secs")]
    pub resend_after_secs: u64,

    /// Seconds a stored code stays valid
    #[serde(default = "default_code_ttl_secs")]
    pub code_ttl_secs: u64,

    /// Wrong-code attempts allowed before the code is invalidated
    #[serde(default = "default_max_verify_attempts")]
    pub max_verify_attempts: u32,

    /// Codes a single phone may request per rolling hour
    #[serde(default = "default_max_sends_per_hour")]
    pub max_sends_per_hour: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
            code_length: default_code_length(),
            resend_after_secs: default_resend_after_secs(),
            code_ttl_secs: default_code_ttl_secs(),
            max_verify_attempts: default_max_verify_attempts(),
            max_sends_per_hour: default_max_sends_per_hour(),
        }
    }
}

impl DispatchConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let channel = std::env::var("OTP_CHANNEL").unwrap_or_else(|_| default_channel());
        let max_attempts = std::env::var("OTP_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_attempts);

        Self {
            channel,
            max_attempts,
            ..Default::default()
        }
    }
}

fn default_channel() -> String {
    String::from("console")
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_delivery_timeout_secs() -> u64 {
    30
}

fn default_code_length() -> usize {
    6
}

fn default_resend_after_secs() -> u64 {
    30
}

fn default_code_ttl_secs() -> u64 {
    600
}

fn default_max_verify_attempts() -> u32 {
    5
}

fn default_max_sends_per_hour() -> u32 {
    5
}
