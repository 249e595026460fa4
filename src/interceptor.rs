//! The interception capability: pre-send mutation and retry decisions.
//!
//! Every request a [`Client`] dispatches flows through exactly one
//! [`Interceptor`]. The interceptor sees the prepared request just before
//! transmission and is consulted on every HTTP error status to decide the
//! fate of the call.
//!
//! [`Client`]: crate::Client

use crate::{transport::StatusMetadata, Error, Request};
use async_trait::async_trait;
use bytes::Bytes;

/// The verdict an interceptor returns for an HTTP error status.
///
/// There is no built-in cap on retries: a policy that keeps answering
/// [`ShouldRetry`](RetryPolicy::ShouldRetry) keeps the call looping. Bounded
/// retry belongs in the interceptor's own state (see the `bounded_retry`
/// demo).
#[derive(Debug)]
pub enum RetryPolicy {
    /// Rebuild and resend the request.
    ShouldRetry,

    /// Give up; the call fails with
    /// [`Error::UnacceptableStatusCode`](crate::Error::UnacceptableStatusCode).
    DoNotRetry,

    /// Give up; the call fails with exactly the supplied error.
    DoNotRetryWith(Error),
}

/// Hooks into the send pipeline of a [`Client`](crate::Client).
///
/// One interceptor instance serves every request its client dispatches,
/// concurrent calls included; the `Send + Sync` bound makes that contract
/// explicit, and implementations with interior state must synchronize it
/// themselves (atomics are usually enough).
///
/// Both hooks have no-op defaults, so implementations override only what
/// they need.
///
/// # Examples
///
/// Stamp every outgoing request and retry server errors once:
///
/// ```
/// use async_trait::async_trait;
/// use bytes::Bytes;
/// use hostbound::{Interceptor, Request, RetryPolicy, StatusMetadata};
/// use http::HeaderValue;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct RetryOnce {
///     retries: AtomicUsize,
/// }
///
/// #[async_trait]
/// impl Interceptor for RetryOnce {
///     fn will_send(&self, request: &mut reqwest::Request) {
///         request
///             .headers_mut()
///             .insert("x-client", HeaderValue::from_static("hostbound"));
///     }
///
///     async fn on_invalid_response(
///         &self,
///         _request: &Request,
///         response: &StatusMetadata,
///         _body: &Bytes,
///     ) -> RetryPolicy {
///         if response.status.is_server_error()
///             && self.retries.fetch_add(1, Ordering::SeqCst) == 0
///         {
///             RetryPolicy::ShouldRetry
///         } else {
///             RetryPolicy::DoNotRetry
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Called immediately before transmission, once per attempt.
    ///
    /// The prepared transport request may be mutated in place: add or
    /// replace headers, rewrite the URL, swap the body. The hook is
    /// synchronous and unguarded; a slow implementation stalls the call.
    fn will_send(&self, _request: &mut reqwest::Request) {}

    /// Called when the server answers with a status outside 200-299.
    ///
    /// Receives the original [`Request`] (not the mutated transport
    /// request), the response status line and headers, and the raw error
    /// body. The hook may suspend, refresh credentials or sleep, before
    /// answering.
    ///
    /// The default declines to retry, which fails the call with
    /// [`Error::UnacceptableStatusCode`](crate::Error::UnacceptableStatusCode).
    async fn on_invalid_response(
        &self,
        _request: &Request,
        _response: &StatusMetadata,
        _body: &Bytes,
    ) -> RetryPolicy {
        RetryPolicy::DoNotRetry
    }
}

/// The default interceptor: sends requests untouched and never retries.
///
/// Installed by [`ClientBuilder`](crate::ClientBuilder) when no interceptor
/// is configured. With it, any HTTP error status fails the call on the
/// first attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInterceptor;

#[async_trait]
impl Interceptor for NoopInterceptor {}
