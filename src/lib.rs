//! # Hostbound - a fixed-host async HTTP client with pluggable interception
//!
//! Hostbound dispatches requests against a single configured host and routes
//! every outgoing request and every HTTP error response through a
//! caller-supplied [`Interceptor`]. The interceptor mutates requests just
//! before transmission (auth headers, correlation ids) and decides, per
//! error response, whether the call is retried, failed, or replaced with a
//! domain error. It is meant to sit at the single network chokepoint of a
//! larger application.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hostbound::{Client, Request};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Comment {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Every request this client sends resolves against this host
//!     let client = Client::builder("jsonplaceholder.typicode.com").build()?;
//!
//!     let response = client
//!         .send(&Request::get("/comments").with_query_param("postId", "1"))
//!         .await?;
//!
//!     let comments: Vec<Comment> = response.json()?;
//!     println!("fetched {} comments", comments.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Interception and retry
//!
//! The retry loop is driven entirely by the interceptor: a non-2xx status
//! hands the response back to [`Interceptor::on_invalid_response`], and the
//! returned [`RetryPolicy`] either resends the request, fails the call with
//! [`Error::UnacceptableStatusCode`], or fails it with a custom error. The
//! client itself imposes no retry cap and no backoff; pacing and bounding
//! live in the interceptor, which can suspend freely in the hook.
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use hostbound::{Client, Interceptor, Request, RetryPolicy, StatusMetadata};
//! use http::HeaderValue;
//! use std::sync::Arc;
//!
//! struct BearerAuth {
//!     token: String,
//! }
//!
//! #[async_trait]
//! impl Interceptor for BearerAuth {
//!     fn will_send(&self, request: &mut reqwest::Request) {
//!         let value = format!("Bearer {}", self.token);
//!         if let Ok(header) = HeaderValue::from_str(&value) {
//!             request.headers_mut().insert("authorization", header);
//!         }
//!     }
//!
//!     async fn on_invalid_response(
//!         &self,
//!         _request: &Request,
//!         response: &StatusMetadata,
//!         _body: &Bytes,
//!     ) -> RetryPolicy {
//!         if response.status.is_server_error() {
//!             RetryPolicy::ShouldRetry
//!         } else {
//!             RetryPolicy::DoNotRetry
//!         }
//!     }
//! }
//!
//! # async fn example() -> Result<(), hostbound::Error> {
//! let client = Client::builder("api.example.com")
//!     .interceptor(Arc::new(BearerAuth { token: "s3cret".into() }))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Fixed-host resolution** - host-relative paths resolve against the
//!   configured scheme and host; complete URLs pass through verbatim
//! - **Pluggable interception** - one [`Interceptor`] sees every outgoing
//!   request and every error response
//! - **Policy-driven retry** - retry decisions belong to the caller, with
//!   no built-in cap or delay
//! - **Content-type aware encoding** - JSON and url-encoded bodies from one
//!   untyped body map
//! - **Swappable transport** - [`Transport`] abstracts the wire; the
//!   default is `reqwest`, tests plug in stubs
//! - **Structured logging** - request attempts and retry decisions are
//!   traced with `tracing`

mod client;
mod error;
mod interceptor;
mod request;
mod response;
pub mod transport;

pub use client::{Client, ClientBuilder, Scheme};
pub use error::{Error, Result};
pub use interceptor::{Interceptor, NoopInterceptor, RetryPolicy};
pub use request::{ContentType, Request};
pub use response::Response;
pub use transport::{RawResponse, StatusMetadata, Transport};
