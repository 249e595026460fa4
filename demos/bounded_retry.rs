//! Example demonstrating a bounded retry budget with backoff delays.
//!
//! This example shows how to:
//! - Cap the number of retries from inside an interceptor
//! - Sleep between attempts with exponential backoff
//! - Respect a server-provided Retry-After header
//! - Fall through to the status error once the budget is spent
//!
//! Run with: `cargo run --example bounded_retry`

use async_trait::async_trait;
use bytes::Bytes;
use hostbound::{Client, Interceptor, Request, RetryPolicy, StatusMetadata};
use http::HeaderMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Longest delay the interceptor will accept from a Retry-After header.
const MAX_WAIT: Duration = Duration::from_secs(5);

/// Retries error responses with exponential backoff, up to a fixed budget.
struct BoundedBackoff {
    max_retries: usize,
    base_delay: Duration,
    failures: AtomicUsize,
}

impl BoundedBackoff {
    fn new(max_retries: usize, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            failures: AtomicUsize::new(0),
        }
    }

    /// Backoff for the given failure count, preferring the server's own
    /// Retry-After value when one is present.
    fn delay_for(&self, failure: usize, headers: &HeaderMap) -> Duration {
        if let Some(retry_after) = parse_retry_after(headers) {
            return retry_after.min(MAX_WAIT);
        }
        self.base_delay * 2u32.pow((failure - 1) as u32)
    }
}

#[async_trait]
impl Interceptor for BoundedBackoff {
    async fn on_invalid_response(
        &self,
        request: &Request,
        response: &StatusMetadata,
        _body: &Bytes,
    ) -> RetryPolicy {
        let failure = self.failures.fetch_add(1, Ordering::SeqCst) + 1;
        if failure > self.max_retries {
            println!("Retry budget spent after {} failures; giving up", failure);
            return RetryPolicy::DoNotRetry;
        }

        let delay = self.delay_for(failure, &response.headers);
        println!(
            "Attempt {} for {} failed with {}; retrying in {:?}",
            failure, request.path, response.status, delay
        );
        tokio::time::sleep(delay).await;
        RetryPolicy::ShouldRetry
    }
}

/// Parses the Retry-After header.
///
/// Supports both delay-seconds (integer) and HTTP-date formats.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get("retry-after")?.to_str().ok()?;

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    if let Ok(date_time) = httpdate::parse_http_date(header) {
        if let Ok(duration) = date_time.duration_since(SystemTime::now()) {
            return Some(duration);
        }
    }

    None
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("hostbound=info,bounded_retry=info")
        .init();

    println!("=== Retrying a Persistently Failing Endpoint ===");
    println!("Delays: 200ms, then 400ms, then the budget is spent");
    let failing = Client::builder("httpbin.org")
        .interceptor(Arc::new(BoundedBackoff::new(2, Duration::from_millis(200))))
        .build()?;

    let start = std::time::Instant::now();
    match failing.send(&Request::get("/status/503")).await {
        Ok(_) => println!("Unexpected success"),
        Err(e) => {
            println!("Failed after retries: {}", e);
            println!("Total time: {:?}", start.elapsed());
        }
    }
    println!();

    println!("=== A Healthy Endpoint Is Untouched by the Budget ===");
    let healthy = Client::builder("httpbin.org")
        .interceptor(Arc::new(BoundedBackoff::new(2, Duration::from_millis(200))))
        .build()?;

    match healthy.send(&Request::get("/status/200")).await {
        Ok(response) => println!("Success on the first attempt: {}", response.status),
        Err(e) => println!("Failed: {}", e),
    }

    Ok(())
}
