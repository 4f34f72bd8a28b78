//! Generic HTTP request execution
//!
//! Wraps `reqwest` so every call resolves to a [`RequestResult`] instead of
//! an error. Transport failures become `status: 0` results; non-2xx responses
//! become `ok: false` results with the best error message the body offers.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Uniform outcome of a request
///
/// `data` carries the parsed body on success and, when present, on HTTP
/// failure too, since error bodies often hold diagnostic fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult<T = Value> {
    /// Parsed response body
    pub data: Option<T>,
    /// Error message when `ok` is false
    pub error: Option<String>,
    /// HTTP status code, or 0 when no response was received
    pub status: u16,
    /// Whether the request completed with a 2xx status
    pub ok: bool,
}

impl<T> RequestResult<T> {
    /// A result for a request that never produced a response
    fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
            status: 0,
            ok: false,
        }
    }
}

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Extra request headers
    pub headers: HeaderMap,
    /// Query string pairs, percent-encoded when sent
    pub query: Vec<(String, String)>,
    /// Optional JSON body
    pub body: Option<Value>,
    /// Optional per-request timeout; none is applied by default
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }
}

impl RequestOptions {
    /// Options for a plain GET request
    pub fn get() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a query string pair
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body
    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Apply a timeout to this request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Executes HTTP requests and normalizes their outcome
///
/// Performs no caching; each call is one network round trip.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    /// Create a new RequestExecutor with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new RequestExecutor with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends a request and returns the parsed body
    ///
    /// Bodies declared as JSON are parsed into a JSON value; anything else is
    /// returned as a JSON string holding the raw text. Never fails: transport
    /// errors (bad URL, DNS, connection reset, timeout) resolve to
    /// `ok: false, status: 0`.
    pub async fn execute(&self, url: &str, options: RequestOptions) -> RequestResult<Value> {
        let mut request = self
            .client
            .request(options.method.clone(), url)
            .headers(options.headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        debug!(method = %options.method, url = url, "Sending request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = url, error = %e, "Request failed before a response arrived");
                return RequestResult::transport_failure(e.to_string());
            }
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                return RequestResult::transport_failure(e.to_string());
            }
        };

        let data = parse_body(&text, is_json);

        if status.is_success() {
            debug!(url = url, status = status.as_u16(), "Request succeeded");
            return RequestResult {
                data: Some(data),
                error: None,
                status: status.as_u16(),
                ok: true,
            };
        }

        let message = error_message(status, &data, &text);
        warn!(
            url = url,
            status = status.as_u16(),
            error = %message,
            "Request returned an error status"
        );

        RequestResult {
            data: Some(data),
            error: Some(message),
            status: status.as_u16(),
            ok: false,
        }
    }

    /// Sends a request and decodes a successful JSON body into `T`
    ///
    /// A body that does not decode into `T` produces an `ok: false` result
    /// carrying the response status. Error responses keep their message and
    /// drop the body.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> RequestResult<T> {
        let result = self.execute(url, options).await;

        if !result.ok {
            return RequestResult {
                data: None,
                error: result.error,
                status: result.status,
                ok: false,
            };
        }

        match result.data.map(serde_json::from_value::<T>).transpose() {
            Ok(data) => RequestResult {
                data,
                error: None,
                status: result.status,
                ok: true,
            },
            Err(e) => RequestResult {
                data: None,
                error: Some(format!("Failed to decode response body: {}", e)),
                status: result.status,
                ok: false,
            },
        }
    }
}

/// Whether a Content-Type header value denotes JSON
fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Parses a body as JSON when declared so, falling back to raw text
fn parse_body(text: &str, is_json: bool) -> Value {
    if is_json {
        match serde_json::from_str(text) {
            Ok(value) => return value,
            Err(e) => debug!(error = %e, "Body declared as JSON did not parse; keeping text"),
        }
    }
    Value::String(text.to_string())
}

/// Picks the most specific error message available for a failed response
///
/// Priority: a `message` field in a JSON body, the raw body text, the
/// status reason phrase, then a generic message naming the status.
fn error_message(status: StatusCode, data: &Value, text: &str) -> String {
    if let Some(message) = data.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if !text.trim().is_empty() {
        return text.to_string();
    }
    if let Some(reason) = status.canonical_reason() {
        return reason.to_string();
    }
    format!("Request failed with status {}", status.as_u16())
}
