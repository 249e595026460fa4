//! The fixed-host client and its send pipeline.
//!
//! [`Client`] is the single entry point for dispatching requests. Use
//! [`Client::builder`] to configure the host, scheme, interceptor, and
//! transport.

use crate::{
    interceptor::{Interceptor, NoopInterceptor, RetryPolicy},
    transport::Transport,
    ContentType, Error, Request, Response, Result,
};
use http::header::{HeaderValue, CONTENT_TYPE};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Protocol scheme applied when resolving host-relative request paths.
///
/// # Examples
///
/// ```
/// use hostbound::Scheme;
///
/// assert_eq!(Scheme::Http.as_str(), "http");
/// assert_eq!(Scheme::default(), Scheme::Https);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Plain HTTP.
    Http,

    /// HTTP over TLS. The default.
    #[default]
    Https,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// An asynchronous HTTP client bound to a single host.
///
/// Every request is resolved against the configured scheme and host (unless
/// its path is already a complete URL), encoded per its content type, run
/// past the configured [`Interceptor`], and dispatched through the
/// transport. HTTP error statuses are handed back to the interceptor, which
/// decides between retrying and failing; see [`Client::send`] for the exact
/// pipeline.
///
/// The client is cheap to clone and safe to share: all configuration is
/// immutable after construction, and concurrent calls proceed independently.
///
/// # Examples
///
/// ```no_run
/// use hostbound::{Client, Request};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Comment {
///     id: u64,
///     body: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder("jsonplaceholder.typicode.com").build()?;
///
/// let response = client.send(&Request::get("/comments/1")).await?;
/// let comment: Comment = response.json()?;
/// println!("comment #{}: {}", comment.id, comment.body);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    host: String,
    scheme: Scheme,
    transport: Arc<dyn Transport>,
    interceptor: Arc<dyn Interceptor>,
}

impl Client {
    /// Creates a new [`ClientBuilder`] for a client bound to `host`.
    ///
    /// `host` is the authority requests resolve against: a domain name or IP
    /// address, optionally with a port (`api.example.com`, `127.0.0.1:8080`).
    pub fn builder(host: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(host)
    }

    /// Dispatches a request and drives the retry pipeline to completion.
    ///
    /// Each attempt rebuilds the URL and transport request from `request`,
    /// offers the prepared request to the interceptor's
    /// [`will_send`](Interceptor::will_send), and transmits it. A status in
    /// 200-299 resolves the call with a [`Response`]. Any other status is
    /// referred to the interceptor's
    /// [`on_invalid_response`](Interceptor::on_invalid_response):
    /// `ShouldRetry` starts the next attempt, `DoNotRetry` fails with
    /// [`Error::UnacceptableStatusCode`], and `DoNotRetryWith` fails with
    /// exactly the supplied error.
    ///
    /// There is no retry cap and no delay between attempts; both are the
    /// interceptor's responsibility. Transport failures are returned
    /// immediately without consulting the interceptor.
    ///
    /// # Errors
    ///
    /// * [`Error::BadUrl`] - the path could not be composed into a URL
    /// * [`Error::Encoding`] - the body could not be encoded
    /// * [`Error::Transport`] - the exchange failed below the HTTP layer
    /// * [`Error::BadData`] - the transport produced no status metadata
    /// * [`Error::UnacceptableStatusCode`] - error status, retry declined
    /// * [`Error::Intercepted`] - whatever the interceptor supplied
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hostbound::{Client, Request};
    ///
    /// # async fn example() -> Result<(), hostbound::Error> {
    /// let client = Client::builder("api.example.com").build()?;
    ///
    /// let response = client
    ///     .send(&Request::get("/health").with_query_param("verbose", "1"))
    ///     .await?;
    /// println!("status: {}", response.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, request: &Request) -> Result<Response> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            // Every attempt starts over from the caller's request; mutations
            // made by will_send never carry across retries.
            let url = self.make_url(&request.path, request.query.as_ref())?;
            let mut prepared = self.make_request(url, request)?;

            self.inner.interceptor.will_send(&mut prepared);

            tracing::debug!(
                method = %prepared.method(),
                url = %prepared.url(),
                attempt = attempt,
                "Sending request"
            );

            let raw = self.inner.transport.execute(prepared).await?;

            let metadata = match raw.metadata {
                Some(metadata) => metadata,
                None => return Err(Error::BadData),
            };

            let status = metadata.status;
            if status.is_success() {
                tracing::debug!(
                    status = status.as_u16(),
                    attempt = attempt,
                    "Request succeeded"
                );
                return Ok(Response::new(raw.body, status));
            }

            tracing::warn!(
                status = status.as_u16(),
                attempt = attempt,
                method = %request.method,
                path = %request.path,
                "Request failed"
            );

            match self
                .inner
                .interceptor
                .on_invalid_response(request, &metadata, &raw.body)
                .await
            {
                RetryPolicy::ShouldRetry => {
                    tracing::info!(
                        attempt = attempt,
                        path = %request.path,
                        "Interceptor requested retry"
                    );
                }
                RetryPolicy::DoNotRetry => {
                    return Err(Error::UnacceptableStatusCode(status));
                }
                RetryPolicy::DoNotRetryWith(error) => {
                    return Err(error);
                }
            }
        }
    }

    /// Composes the absolute URL for `path`.
    ///
    /// Host-relative paths (starting with `/`) resolve against the
    /// configured scheme and host; anything else must already be a complete
    /// URL and is used verbatim. A present query map replaces whatever query
    /// the path itself carried.
    fn make_url(&self, path: &str, query: Option<&HashMap<String, String>>) -> Result<Url> {
        let mut url = if path.starts_with('/') {
            // Joining against the configured authority applies the client's
            // scheme and host while keeping any query or fragment the path
            // string carries.
            let base = format!("{}://{}", self.inner.scheme.as_str(), self.inner.host);
            let base = Url::parse(&base).map_err(|source| Error::BadUrl {
                path: path.to_string(),
                source,
            })?;
            let mut joined = base.join(path).map_err(|source| Error::BadUrl {
                path: path.to_string(),
                source,
            })?;

            // A protocol-relative path ("//host/x") carries its own
            // authority through the join; every slash-prefixed path lands
            // on the configured host.
            if joined.authority() != base.authority() {
                let mut rebuilt = base.clone();
                rebuilt.set_path(joined.path());
                rebuilt.set_query(joined.query());
                rebuilt.set_fragment(joined.fragment());
                joined = rebuilt;
            }

            joined
        } else {
            Url::parse(path).map_err(|source| Error::BadUrl {
                path: path.to_string(),
                source,
            })?
        };

        if let Some(query) = query {
            url.set_query(None);
            if !query.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in query {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }

    /// Encodes `request` into a transport request for `url`.
    ///
    /// When a body is present the `Content-Type` header is always set, even
    /// for the content types that encode no bytes.
    fn make_request(&self, url: Url, request: &Request) -> Result<reqwest::Request> {
        let mut prepared = reqwest::Request::new(request.method.clone(), url);

        if let Some(body) = &request.body {
            prepared.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static(request.content_type.as_str()),
            );

            match request.content_type {
                ContentType::Json => {
                    let bytes = serde_json::to_vec(body)
                        .map_err(|e| Error::Encoding(e.to_string()))?;
                    *prepared.body_mut() = Some(bytes.into());
                }
                ContentType::UrlEncoded => {
                    *prepared.body_mut() = Some(render_query_string(body).into());
                }
                // Multipart encoding is not implemented: the header is
                // advertised but no body bytes are produced.
                ContentType::FormData | ContentType::Other => {}
            }
        }

        Ok(prepared)
    }
}

/// Renders a body map as a raw query string for [`ContentType::UrlEncoded`].
///
/// String values are rendered verbatim, everything else in its compact JSON
/// form, and no percent-encoding is applied. Square brackets become curly
/// braces in the final rendering; some backends depend on that exact wire
/// format.
fn render_query_string(body: &Map<String, Value>) -> String {
    let rendered = body
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}={}", key, s),
            other => format!("{}={}", key, other),
        })
        .collect::<Vec<_>>()
        .join("&");

    rendered.replace('[', "{").replace(']', "}")
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use hostbound::{Client, NoopInterceptor, Scheme};
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), hostbound::Error> {
/// let client = Client::builder("intranet.example.com")
///     .scheme(Scheme::Http)
///     .interceptor(Arc::new(NoopInterceptor))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    host: String,
    scheme: Scheme,
    interceptor: Option<Arc<dyn Interceptor>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a builder for a client bound to `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            scheme: Scheme::default(),
            interceptor: None,
            transport: None,
        }
    }

    /// Sets the scheme used for host-relative paths.
    ///
    /// Defaults to [`Scheme::Https`].
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Installs the interceptor consulted by every request this client
    /// sends.
    ///
    /// Defaults to [`NoopInterceptor`], which sends requests untouched and
    /// never retries.
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Supplies the transport that performs the HTTP exchanges.
    ///
    /// Defaults to a freshly built [`reqwest::Client`]. Pass a preconfigured
    /// `reqwest::Client` wrapped in an `Arc` to control timeouts, proxies,
    /// or TLS settings.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the default transport cannot be
    /// constructed.
    pub fn build(self) -> Result<Client> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http_client = reqwest::Client::builder().build().map_err(|e| {
                    Error::Configuration(format!("Failed to build HTTP client: {}", e))
                })?;
                Arc::new(http_client) as Arc<dyn Transport>
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                host: self.host,
                scheme: self.scheme,
                transport,
                interceptor: self
                    .interceptor
                    .unwrap_or_else(|| Arc::new(NoopInterceptor)),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> Client {
        Client::builder("api.example.com").build().unwrap()
    }

    #[test]
    fn test_relative_path_resolves_against_host() {
        let client = test_client();
        let url = client.make_url("/v1/items", None).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/items");
    }

    #[test]
    fn test_relative_path_uses_configured_scheme() {
        let client = Client::builder("api.example.com")
            .scheme(Scheme::Http)
            .build()
            .unwrap();
        let url = client.make_url("/v1/items", None).unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/v1/items");
    }

    #[test]
    fn test_host_may_carry_a_port() {
        let client = Client::builder("localhost:8080")
            .scheme(Scheme::Http)
            .build()
            .unwrap();
        let url = client.make_url("/ping", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/ping");
    }

    #[test]
    fn test_absolute_url_is_used_verbatim() {
        let client = test_client();
        let url = client
            .make_url("http://other.example.org:9090/x?keep=1", None)
            .unwrap();
        assert_eq!(url.as_str(), "http://other.example.org:9090/x?keep=1");
    }

    #[test]
    fn test_protocol_relative_path_lands_on_configured_host() {
        let client = test_client();
        let url = client.make_url("//other.example.org/x", None).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/x");
    }

    #[test]
    fn test_protocol_relative_path_keeps_configured_port() {
        let client = Client::builder("localhost:8080")
            .scheme(Scheme::Http)
            .build()
            .unwrap();
        let url = client
            .make_url("//other.example.org/x?keep=1", None)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/x?keep=1");
    }

    #[test]
    fn test_query_map_entries_become_query_pairs() {
        let client = test_client();
        let query = HashMap::from([
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "50".to_string()),
        ]);

        let url = client.make_url("/items", Some(&query)).unwrap();

        let pairs: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs, query);
    }

    #[test]
    fn test_query_map_replaces_path_query() {
        let client = test_client();
        let query = HashMap::from([("q".to_string(), "rust".to_string())]);

        let url = client.make_url("/search?old=1", Some(&query)).unwrap();

        assert_eq!(url.query(), Some("q=rust"));
    }

    #[test]
    fn test_path_query_survives_without_query_map() {
        let client = test_client();
        let url = client.make_url("/search?page=2", None).unwrap();
        assert_eq!(url.query(), Some("page=2"));
    }

    #[test]
    fn test_empty_query_map_renders_no_query() {
        let client = test_client();
        let url = client.make_url("/items?stale=1", Some(&HashMap::new())).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_scheme_less_path_is_bad_url() {
        let client = test_client();
        let result = client.make_url("comments", None);
        match result {
            Err(Error::BadUrl { path, .. }) => assert_eq!(path, "comments"),
            other => panic!("Expected BadUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_host_is_bad_url() {
        let client = Client::builder("not a host").build().unwrap();
        let result = client.make_url("/items", None);
        assert!(matches!(result, Err(Error::BadUrl { .. })));
    }

    #[test]
    fn test_json_body_is_serialized() {
        let client = test_client();
        let url = client.make_url("/posts", None).unwrap();

        let mut body = Map::new();
        body.insert("count".to_string(), json!(3));
        body.insert("title".to_string(), json!("hello"));
        let request = Request::post("/posts").with_body(body.clone());

        let prepared = client.make_request(url, &request).unwrap();

        assert_eq!(
            prepared.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = prepared.body().unwrap().as_bytes().unwrap();
        assert_eq!(bytes, serde_json::to_vec(&body).unwrap().as_slice());
    }

    #[test]
    fn test_url_encoded_body_substitutes_brackets() {
        let client = test_client();
        let url = client.make_url("/lookup", None).unwrap();

        let mut body = Map::new();
        body.insert("ids".to_string(), json!("[1,2]"));
        let request = Request::post("/lookup")
            .with_body(body)
            .with_content_type(ContentType::UrlEncoded);

        let prepared = client.make_request(url, &request).unwrap();

        assert_eq!(
            prepared.headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        let bytes = prepared.body().unwrap().as_bytes().unwrap();
        assert_eq!(std::str::from_utf8(bytes).unwrap(), "ids={1,2}");
    }

    #[test]
    fn test_url_encoded_rendering_is_raw() {
        // Keys iterate in sorted order, string values render unquoted, and
        // non-string values render as compact JSON.
        let mut body = Map::new();
        body.insert("b_limit".to_string(), json!(25));
        body.insert("a_name".to_string(), json!("a&b"));
        body.insert("c_tags".to_string(), json!(["x", "y"]));

        let rendered = render_query_string(&body);

        assert_eq!(rendered, "a_name=a&b&b_limit=25&c_tags={\"x\",\"y\"}");
    }

    #[test]
    fn test_absent_body_sets_no_header_and_no_bytes() {
        let client = test_client();
        let url = client.make_url("/items", None).unwrap();
        let request = Request::get("/items");

        let prepared = client.make_request(url, &request).unwrap();

        assert!(prepared.headers().get(CONTENT_TYPE).is_none());
        assert!(prepared.body().is_none());
    }

    #[test]
    fn test_form_data_and_other_send_no_body_bytes() {
        let client = test_client();

        for (content_type, expected_header) in [
            (ContentType::FormData, "multipart/form-data"),
            (ContentType::Other, "application/octet-stream"),
        ] {
            let url = client.make_url("/upload", None).unwrap();
            let mut body = Map::new();
            body.insert("field".to_string(), json!("value"));
            let request = Request::post("/upload")
                .with_body(body)
                .with_content_type(content_type);

            let prepared = client.make_request(url, &request).unwrap();

            assert_eq!(
                prepared.headers().get(CONTENT_TYPE).unwrap(),
                expected_header
            );
            assert!(prepared.body().is_none());
        }
    }
}
