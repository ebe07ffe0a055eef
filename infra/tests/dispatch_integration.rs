//! End-to-end tests for the OTP dispatch pipeline

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use te_core::domain::entities::otp::OtpDispatch;
use te_core::services::verification::VerificationService;
use te_infra::dispatch::{ConsoleOtpChannel, DispatchQueue, InMemoryOtpStore, OtpChannel};
use te_shared::config::DispatchConfig;

fn fast_config() -> DispatchConfig {
    DispatchConfig {
        max_attempts: 3,
        retry_backoff_ms: 1,
        delivery_timeout_secs: 1,
        ..DispatchConfig::default()
    }
}

fn service(queue: DispatchQueue) -> VerificationService<DispatchQueue> {
    VerificationService::new(queue, Arc::new(InMemoryOtpStore::new()), fast_config())
}

async fn wait_for<F: Fn() -> bool>(condition: F) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

/// Collects everything the subscriber writes so tests can assert on it
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn request_code_delivers_through_worker() {
    let channel = Arc::new(ConsoleOtpChannel::new());
    let (queue, _worker) = DispatchQueue::spawn(channel.clone(), fast_config());
    let service = service(queue);

    let outcome = service.request_code("+919876543210").await.unwrap();
    assert_eq!(outcome.resend_after, 30);

    wait_for(|| channel.delivered_count() == 1).await;
}

#[tokio::test]
async fn console_delivery_log_line_carries_phone_and_code() {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let channel = ConsoleOtpChannel::new();
    channel
        .deliver(&OtpDispatch::new("+910000000000", "428613"))
        .await
        .unwrap();

    let output = capture.contents();
    assert!(
        output.contains("+910000000000"),
        "log output missing phone: {output}"
    );
    assert!(
        output.contains("428613"),
        "log output missing code: {output}"
    );
}

#[tokio::test]
async fn request_code_survives_transient_delivery_failures() {
    let channel = Arc::new(ConsoleOtpChannel::new());
    channel.fail_next(2);
    let (queue, _worker) = DispatchQueue::spawn(channel.clone(), fast_config());
    let service = service(queue);

    service.request_code("+919876543210").await.unwrap();

    wait_for(|| channel.delivered_count() == 1).await;
}

#[tokio::test]
async fn invalid_phone_never_reaches_the_channel() {
    let channel = Arc::new(ConsoleOtpChannel::new());
    let (queue, _worker) = DispatchQueue::spawn(channel.clone(), fast_config());
    let service = service(queue);

    assert!(service.request_code("12345").await.is_err());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(channel.delivered_count(), 0);
}

#[tokio::test]
async fn burst_of_requests_all_deliver() {
    let channel = Arc::new(ConsoleOtpChannel::new());
    let (queue, _worker) = DispatchQueue::spawn(channel.clone(), fast_config());
    let service = service(queue);

    for i in 0..20 {
        service
            .request_code(&format!("+9198765432{:02}", i))
            .await
            .unwrap();
    }

    wait_for(|| channel.delivered_count() == 20).await;
}
