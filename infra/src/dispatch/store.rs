//! In-process OTP code store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use te_core::errors::DomainError;
use te_core::services::verification::{OtpRecord, OtpStore};

/// Stores pending verification codes in process memory
///
/// Records vanish on restart, which only means the user requests a fresh
/// code. A deployment that needs codes to survive restarts would put a
/// shared cache behind the same trait.
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(phone).cloned())
    }

    async fn put(&self, phone: &str, record: OtpRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert(phone.to_string(), record);
        Ok(())
    }

    async fn remove(&self, phone: &str) -> Result<(), DomainError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.remove(phone);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(code: &str) -> OtpRecord {
        OtpRecord {
            code: code.to_string(),
            created_at: Utc::now(),
            verify_attempts: 0,
            send_times: vec![Utc::now()],
        }
    }

    #[tokio::test]
    async fn test_roundtrip_and_removal() {
        let store = InMemoryOtpStore::new();

        store.put("+919876543210", record("123456")).await.unwrap();
        let stored = store.get("+919876543210").await.unwrap().unwrap();
        assert_eq!(stored.code, "123456");

        store.remove("+919876543210").await.unwrap();
        assert!(store.get("+919876543210").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing_record() {
        let store = InMemoryOtpStore::new();

        store.put("+919876543210", record("111111")).await.unwrap();
        store.put("+919876543210", record("222222")).await.unwrap();

        let stored = store.get("+919876543210").await.unwrap().unwrap();
        assert_eq!(stored.code, "222222");
    }
}
