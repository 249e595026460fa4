//! Request values and content-type dispatch.

use http::Method;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The media type a request body is encoded as.
///
/// The variant decides both the `Content-Type` header and how the body map
/// is turned into bytes. Only [`Json`](ContentType::Json) and
/// [`UrlEncoded`](ContentType::UrlEncoded) produce body bytes; the other
/// variants advertise the media type but transmit an empty body.
///
/// # Examples
///
/// ```
/// use hostbound::ContentType;
///
/// assert_eq!(ContentType::Json.as_str(), "application/json");
/// assert_eq!(
///     ContentType::UrlEncoded.as_str(),
///     "application/x-www-form-urlencoded"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// `application/json`; the body map is serialized as a JSON object.
    #[default]
    Json,

    /// `multipart/form-data`; the header is set but no body bytes are
    /// produced (multipart encoding is not implemented).
    FormData,

    /// `application/x-www-form-urlencoded`; the body map is rendered as a
    /// raw query string.
    UrlEncoded,

    /// `application/octet-stream`; the header is set but no body bytes are
    /// produced.
    Other,
}

impl ContentType {
    /// Returns the canonical media type string sent in the `Content-Type`
    /// header.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::FormData => "multipart/form-data",
            ContentType::UrlEncoded => "application/x-www-form-urlencoded",
            ContentType::Other => "application/octet-stream",
        }
    }
}

/// A single HTTP call to be dispatched by [`Client::send`].
///
/// The `path` is either host-relative (starting with `/`, resolved against
/// the client's configured scheme and host) or a complete URL that is used
/// verbatim. The body, when present, is a string-keyed map of arbitrary JSON
/// values encoded according to `content_type`.
///
/// Requests are plain values: build one with the method constructors and the
/// `with_*` chainers, then hand it to the client. The client never mutates
/// it, so the same request can be sent repeatedly.
///
/// # Examples
///
/// ```
/// use hostbound::{ContentType, Request};
/// use serde_json::{json, Map};
///
/// let list = Request::get("/comments").with_query_param("postId", "1");
///
/// let mut body = Map::new();
/// body.insert("title".to_string(), json!("hello"));
/// body.insert("userId".to_string(), json!(7));
///
/// let create = Request::post("/posts")
///     .with_body(body)
///     .with_content_type(ContentType::Json);
///
/// assert_eq!(list.path, "/comments");
/// assert_eq!(create.content_type, ContentType::Json);
/// ```
///
/// [`Client::send`]: crate::Client::send
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,

    /// Host-relative path (`/users/42`) or complete URL.
    pub path: String,

    /// Query parameters for this request.
    ///
    /// When present, these replace any query string the path itself carries.
    /// Order on the wire is not guaranteed.
    pub query: Option<HashMap<String, String>>,

    /// The body payload as a string-keyed map, encoded per `content_type`.
    pub body: Option<Map<String, Value>>,

    /// How the body is encoded and advertised.
    pub content_type: ContentType,
}

impl Request {
    /// Creates a new `Request` with the given method and path.
    ///
    /// The content type defaults to [`ContentType::Json`]; query and body
    /// start empty.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: None,
            content_type: ContentType::Json,
        }
    }

    /// Creates a GET request for the given path.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request for the given path.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PUT request for the given path.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a DELETE request for the given path.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a query parameter to the request.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_query_params(
        mut self,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.query.get_or_insert_with(HashMap::new).extend(params);
        self
    }

    /// Sets the body map for the request.
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the content type the body is encoded as.
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}
