//! Response values returned by successful calls.

use bytes::Bytes;
use http::StatusCode;

/// The outcome of a successfully dispatched request.
///
/// [`Client::send`] returns a `Response` only for statuses in the 200-299
/// range, so `success` is always `true` on values obtained from the client.
/// The field restates the status classification for callers that forward
/// responses across boundaries where the status code is no longer at hand.
///
/// The body is kept as raw bytes; interpreting it belongs to the caller.
/// [`Response::json`] is provided as a convenience for the common case.
///
/// # Examples
///
/// ```
/// use hostbound::Response;
/// use http::StatusCode;
///
/// let response = Response::new(r#"{"ok":true}"#, StatusCode::OK);
/// assert!(response.success);
/// assert_eq!(response.status, StatusCode::OK);
/// assert_eq!(&response.data[..], br#"{"ok":true}"#);
/// ```
///
/// [`Client::send`]: crate::Client::send
#[derive(Debug, Clone)]
pub struct Response {
    /// The raw response body.
    pub data: Bytes,

    /// Whether `status` is in the 200-299 range.
    pub success: bool,

    /// The HTTP status code of the response.
    pub status: StatusCode,
}

impl Response {
    /// Creates a new `Response`, deriving `success` from the status class.
    pub fn new(data: impl Into<Bytes>, status: StatusCode) -> Self {
        Self {
            data: data.into(),
            success: status.is_success(),
            status,
        }
    }

    /// Deserializes the body as JSON into `T`.
    ///
    /// The send pipeline never parses response bodies; this helper exists
    /// for callers and returns the plain `serde_json` error on malformed
    /// payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use hostbound::Response;
    /// use http::StatusCode;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Health {
    ///     ok: bool,
    /// }
    ///
    /// let response = Response::new(r#"{"ok":true}"#, StatusCode::OK);
    /// let health: Health = response.json()?;
    /// assert!(health.ok);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn json<T>(&self) -> std::result::Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.data)
    }
}
