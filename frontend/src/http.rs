//! HTTP transport abstraction.
//!
//! The API client talks to [`HttpClient`] instead of the browser fetch API
//! directly, so request/response handling can run on the host in tests.
//! [`FetchHttpClient`] is the production implementation on `gloo-net`;
//! [`MockHttpClient`] records requests and serves canned responses.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// Core abstraction
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for gloo_net::http::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => gloo_net::http::Method::GET,
            HttpMethod::Post => gloo_net::http::Method::POST,
            HttpMethod::Put => gloo_net::http::Method::PUT,
            HttpMethod::Patch => gloo_net::http::Method::PATCH,
            HttpMethod::Delete => gloo_net::http::Method::DELETE,
        }
    }
}

/// One outgoing request. `url` carries no query string; query parameters
/// travel as pairs so tests can assert on them structurally and the fetch
/// layer can encode them.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, params: Vec<(String, String)>) -> Self {
        self.query = params;
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// A completed response. The body is kept as bytes because the export
/// endpoint returns a binary spreadsheet; JSON callers go through
/// [`HttpResponse::json`]. Header names are lowercased.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError(String);

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HttpError {}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// Implementation: browser fetch
// =========================================================

/// Response headers the client actually reads; everything else is dropped
/// to keep the transfer small.
const FORWARDED_HEADERS: [&str; 2] = ["content-type", "content-disposition"];

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = gloo_net::http::RequestBuilder::new(&req.url).method(req.method.into());

        if !req.query.is_empty() {
            builder = builder.query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::new(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        let mut headers = HashMap::new();
        for name in FORWARDED_HEADERS {
            if let Some(value) = response.headers().get(name) {
                headers.insert(name.to_string(), value);
            }
        }

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// =========================================================
// Test double: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // keyed by URL without query; the full request lands in `requests`
    responses: RefCell<HashMap<String, HttpResponse>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses.borrow_mut().insert(
            url.to_string(),
            HttpResponse::new(status, body.to_string().into_bytes()),
        );
    }

    pub fn mock_raw_response(&self, url: &str, response: HttpResponse) {
        self.responses.borrow_mut().insert(url.to_string(), response);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(req.clone());

        let responses = self.responses.borrow();
        if let Some(response) = responses.get(&req.url) {
            Ok(response.clone())
        } else {
            Ok(HttpResponse::new(404, b"Not Found".to_vec()))
        }
    }
}
