use crate::http::cookie::HttpCookie;
use crate::http::headers::HttpHeaders;
use crate::http::query::QueryParams;
use crate::session::{Session, SessionStore};

/// HTTP request methods.
///
/// The router serves GET and POST. Every other method parses fine but is
/// answered with a 405 redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// Matching is case-sensitive, as in the request line.
    ///
    /// # Example
    ///
    /// ```
    /// # use minicat::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

/// A parsed HTTP request.
///
/// Built once per connection and never mutated afterwards. The path never
/// contains a query component; the query string is parsed into
/// [`QueryParams`] instead.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    headers: HttpHeaders,
    query_params: QueryParams,
    cookie: HttpCookie,
    body: String,
}

impl Request {
    pub fn method(&self) -> Method {
        self.method
    }

    /// Request path without the query string (e.g. "/index.html")
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP version (typically "HTTP/1.1")
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    pub fn cookie(&self) -> &HttpCookie {
        &self.cookie
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Looks up the session named by the `JSESSIONID` cookie.
    ///
    /// Never creates a session. A missing cookie or an unknown id both
    /// yield `None`.
    pub async fn session(&self, store: &SessionStore) -> Option<Session> {
        store.resolve(&self.cookie).await
    }
}

/// Builder for constructing Request objects.
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: HttpHeaders,
    query_params: QueryParams,
    body: String,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the path. Anything after a `?` is dropped; use
    /// [`RequestBuilder::query_params`] for the query.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if let Some(index) = path.find('?') {
            path.truncate(index);
        }
        self.path = Some(path);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn query_params(mut self, query_params: QueryParams) -> Self {
        self.query_params = query_params;
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the request. The cookie is derived from the `Cookie` header.
    pub fn build(self) -> Result<Request, &'static str> {
        let cookie = self
            .headers
            .get("Cookie")
            .map(HttpCookie::parse)
            .unwrap_or_default();

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            query_params: self.query_params,
            cookie,
            body: self.body,
        })
    }
}
