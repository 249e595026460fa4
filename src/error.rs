//! Error types for client construction and request dispatch.
//!
//! Every way a call can fail surfaces as a variant of [`Error`]. Each variant
//! preserves the context the pipeline had at the point of failure: the
//! offending path for URL composition, the status code for rejected
//! responses, the untouched transport error for network failures.

use http::StatusCode;

/// The error type for client construction and request dispatch.
///
/// # Examples
///
/// ```no_run
/// use hostbound::{Client, Error, Request};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder("api.example.com").build()?;
///
/// match client.send(&Request::get("/status")).await {
///     Ok(response) => println!("Got {} bytes", response.data.len()),
///     Err(Error::UnacceptableStatusCode(status)) => {
///         eprintln!("Server rejected the call: {}", status);
///     }
///     Err(Error::Transport(e)) => eprintln!("Network trouble: {}", e),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request path could not be composed into a valid URL.
    ///
    /// Raised when the path fails to parse, or when a host-relative path
    /// cannot be resolved against the configured scheme and host.
    ///
    /// # Fields
    ///
    /// * `path` - The path exactly as it appeared in the request
    /// * `source` - The underlying URL parse error
    #[error("Invalid URL from path {path:?}: {source}")]
    BadUrl {
        /// The path exactly as it appeared in the request.
        path: String,
        /// The underlying URL parse error.
        source: url::ParseError,
    },

    /// The request body could not be encoded for its declared content type.
    ///
    /// Encoding failures are hard errors: the request is never transmitted.
    #[error("Failed to encode request body: {0}")]
    Encoding(String),

    /// A transport-level error occurred (connection failed, DNS lookup
    /// failed, request interrupted mid-flight).
    ///
    /// The underlying `reqwest::Error` is carried untouched. Transport
    /// failures surface immediately and never consult the interceptor;
    /// only HTTP-level error statuses reach the retry hook.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The transport completed an exchange without producing recognizable
    /// HTTP status metadata.
    ///
    /// Only reachable through custom [`Transport`] implementations; the
    /// bundled `reqwest` transport always recovers a status line.
    ///
    /// [`Transport`]: crate::Transport
    #[error("Transport produced no recognizable HTTP response")]
    BadData,

    /// The server answered with a status outside 200-299 and the
    /// interceptor declined to retry.
    #[error("Unacceptable status code {0}")]
    UnacceptableStatusCode(StatusCode),

    /// An error supplied by the interceptor through
    /// [`RetryPolicy::DoNotRetryWith`].
    ///
    /// The boxed error surfaces from [`Client::send`] exactly as the
    /// interceptor provided it; use [`Error::intercepted`] to wrap a
    /// domain error when building the policy.
    ///
    /// [`RetryPolicy::DoNotRetryWith`]: crate::RetryPolicy::DoNotRetryWith
    /// [`Client::send`]: crate::Client::send
    #[error("Interceptor error: {source}")]
    Intercepted {
        /// The error exactly as the interceptor supplied it.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid configuration was provided to the builder.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Wraps a caller-supplied error for use with
    /// [`RetryPolicy::DoNotRetryWith`](crate::RetryPolicy::DoNotRetryWith).
    ///
    /// # Examples
    ///
    /// ```
    /// use hostbound::Error;
    ///
    /// #[derive(Debug)]
    /// struct TokenExpired;
    ///
    /// impl std::fmt::Display for TokenExpired {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "authentication token expired")
    ///     }
    /// }
    ///
    /// impl std::error::Error for TokenExpired {}
    ///
    /// let err = Error::intercepted(TokenExpired);
    /// assert!(matches!(err, Error::Intercepted { .. }));
    /// ```
    pub fn intercepted(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Intercepted {
            source: Box::new(source),
        }
    }

    /// Returns the HTTP status code if this error has one.
    ///
    /// Returns `Some(status)` for `UnacceptableStatusCode` and for
    /// transport errors that carry a status, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use hostbound::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::UnacceptableStatusCode(StatusCode::FORBIDDEN);
    /// assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    ///
    /// let err = Error::BadData;
    /// assert_eq!(err.status(), None);
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnacceptableStatusCode(status) => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// A specialized `Result` type for client operations.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
