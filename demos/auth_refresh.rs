//! Example demonstrating token refresh through an interceptor.
//!
//! This example shows how to:
//! - Attach an Authorization header to every outgoing request
//! - Detect an expired or missing token from a 401 response
//! - Refresh the token and retry the request
//! - Surface a domain error when refreshing does not help
//!
//! Run with: `cargo run --example auth_refresh`

use async_trait::async_trait;
use bytes::Bytes;
use hostbound::{Client, Error, Interceptor, Request, RetryPolicy, StatusMetadata};
use http::header::{HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Deserialize)]
struct BearerCheck {
    authenticated: bool,
    token: String,
}

#[derive(Debug)]
struct AuthenticationFailed;

impl std::fmt::Display for AuthenticationFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "credentials rejected even after a token refresh")
    }
}

impl std::error::Error for AuthenticationFailed {}

/// Holds the current bearer token and refreshes it on 401 responses.
#[derive(Default)]
struct TokenRefresher {
    token: Mutex<Option<String>>,
    refreshes: AtomicUsize,
}

impl TokenRefresher {
    /// Stands in for a round trip to the auth server.
    fn refresh_token(&self) -> String {
        let serial = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        format!("demo-token-{}", serial)
    }
}

#[async_trait]
impl Interceptor for TokenRefresher {
    fn will_send(&self, request: &mut reqwest::Request) {
        if let Some(token) = self.token.lock().unwrap().as_ref() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                request.headers_mut().insert(AUTHORIZATION, value);
            }
        }
    }

    async fn on_invalid_response(
        &self,
        request: &Request,
        response: &StatusMetadata,
        _body: &Bytes,
    ) -> RetryPolicy {
        if response.status.as_u16() != 401 {
            return RetryPolicy::DoNotRetry;
        }

        // One refresh per client; a second 401 means the credentials are
        // genuinely rejected.
        if self.refreshes.load(Ordering::SeqCst) >= 1 {
            return RetryPolicy::DoNotRetryWith(Error::intercepted(AuthenticationFailed));
        }

        println!("Got 401 for {}; refreshing token", request.path);
        let fresh = self.refresh_token();
        *self.token.lock().unwrap() = Some(fresh);
        RetryPolicy::ShouldRetry
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("hostbound=info,auth_refresh=info")
        .init();

    let interceptor = Arc::new(TokenRefresher::default());
    let client = Client::builder("httpbin.org")
        .interceptor(interceptor.clone())
        .build()?;

    println!("=== Bearer Auth with Automatic Refresh ===");
    println!("The first attempt carries no token and is rejected with 401.");
    println!("The interceptor refreshes the token and the retry succeeds.");
    println!();

    match client.send(&Request::get("/bearer")).await {
        Ok(response) => {
            let check: BearerCheck = response.json()?;
            println!("Authenticated: {}", check.authenticated);
            println!("Token the server saw: {}", check.token);
        }
        Err(e) => println!("Failed: {}", e),
    }

    println!();
    println!(
        "Token refreshes performed: {}",
        interceptor.refreshes.load(Ordering::SeqCst)
    );

    Ok(())
}
