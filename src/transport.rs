//! The transport seam between the client and the network.
//!
//! [`Transport`] abstracts the component that actually performs an HTTP
//! exchange. The bundled implementation delegates to [`reqwest::Client`];
//! tests substitute stubs to drive the pipeline without a network.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// Status line and headers of a completed exchange.
///
/// This is the recognizable HTTP envelope the client inspects after each
/// transport exchange. For statuses outside 200-299 it is handed to
/// [`Interceptor::on_invalid_response`] alongside the raw body.
///
/// [`Interceptor::on_invalid_response`]: crate::Interceptor::on_invalid_response
#[derive(Debug, Clone)]
pub struct StatusMetadata {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,
}

/// Raw output of a single transport exchange.
///
/// `metadata` is `None` when the transport completed without recovering an
/// HTTP envelope; the client surfaces that as [`Error::BadData`].
///
/// [`Error::BadData`]: crate::Error::BadData
#[derive(Debug)]
pub struct RawResponse {
    /// Status and headers, when the transport recovered them.
    pub metadata: Option<StatusMetadata>,

    /// The response body bytes (possibly empty).
    pub body: Bytes,
}

/// The component that performs HTTP exchanges on behalf of
/// [`Client`](crate::Client).
///
/// One transport instance is shared by every call the client makes,
/// concurrent calls included, so implementations must be reentrant.
/// Errors returned from [`execute`](Transport::execute) surface from the
/// client verbatim as [`Error::Transport`](crate::Error::Transport) without
/// consulting the interceptor.
///
/// `reqwest::Client` implements this trait, which is also how transport
/// configuration is passed through: build the `reqwest::Client` you want
/// (timeouts, proxies, TLS) and install it via
/// [`ClientBuilder::transport`](crate::ClientBuilder::transport).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one prepared request and returns the raw exchange result.
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<RawResponse>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> reqwest::Result<RawResponse> {
        let response = reqwest::Client::execute(self, request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse {
            metadata: Some(StatusMetadata { status, headers }),
            body,
        })
    }
}
