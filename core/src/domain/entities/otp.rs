//! OTP dispatch job record

use serde::{Deserialize, Serialize};

use te_shared::utils::phone::mask_phone;

/// A unit of OTP delivery work handed to the dispatch queue
///
/// The record is submitted, delivered (or dead-lettered), and discarded;
/// it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpDispatch {
    /// Destination phone number in E.164 format
    pub phone_number: String,

    /// One-time code to deliver
    pub code: String,
}

impl OtpDispatch {
    /// Create a new dispatch job
    pub fn new(phone_number: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            code: code.into(),
        }
    }

    /// Masked phone number for logging
    pub fn masked_phone(&self) -> String {
        mask_phone(&self.phone_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_phone_hides_digits() {
        let job = OtpDispatch::new("+919876543210", "123456");
        let masked = job.masked_phone();
        assert!(masked.ends_with("3210"));
        assert!(!masked.contains("98765"));
    }
}
