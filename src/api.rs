// API client module: a small blocking HTTP gateway in front of the Safe
// Courier backend. It only builds URLs and sends requests; interpreting
// status codes is left to the account and resource operations.

use crate::error::{CourierError, CourierResult};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Production backend, including the versioned path prefix.
pub const DEFAULT_BASE_URL: &str = "https://safe-courier-backend-api.herokuapp.com/api/v1";

/// A fully formed request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Raw response: status code and body text, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    /// Only 200 counts as success; 201/204 are treated like any other status.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> CourierResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The server's `message` field. Falls back to the raw body, then to
    /// `HTTP <status>` when the body is empty.
    pub fn message(&self) -> String {
        if let Ok(serde_json::Value::Object(map)) =
            serde_json::from_str::<serde_json::Value>(&self.body)
        {
            match map.get("message") {
                Some(serde_json::Value::String(m)) => return m.clone(),
                Some(other) => return other.to_string(),
                None => {}
            }
        }
        let raw = self.body.trim();
        if raw.is_empty() {
            format!("HTTP {}", self.status)
        } else {
            raw.to_string()
        }
    }

    pub fn into_rejection(self) -> CourierError {
        CourierError::Rejected {
            message: self.message(),
            status: self.status,
        }
    }
}

/// Sends one request and returns the raw response. Implemented by the
/// reqwest-backed [`HttpTransport`] and by scripted transports in tests.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> CourierResult<ApiResponse>;
}

/// Transport backed by a blocking reqwest client with default settings
/// (no timeout override, default TLS).
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> CourierResult<Self> {
        let client = Client::builder().build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> CourierResult<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let res = builder.send()?;
        let status = res.status().as_u16();
        let body = res.text()?;
        Ok(ApiResponse { status, body })
    }
}

/// Gateway holding the base URL and the transport used for every call.
pub struct ApiClient {
    transport: Box<dyn Transport>,
    base_url: String,
}

impl ApiClient {
    /// Client talking HTTP to `base_url`.
    pub fn new(base_url: &str) -> CourierResult<Self> {
        Ok(Self::with_transport(base_url, HttpTransport::new()?))
    }

    pub fn with_transport(base_url: &str, transport: impl Transport + 'static) -> Self {
        ApiClient {
            transport: Box::new(transport),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn get(&self, path: &str, headers: HeaderMap) -> CourierResult<ApiResponse> {
        self.send(Method::GET, path, None, headers)
    }

    pub fn post(&self, path: &str, body: String, headers: HeaderMap) -> CourierResult<ApiResponse> {
        self.send(Method::POST, path, Some(body), headers)
    }

    pub fn put(&self, path: &str, body: String, headers: HeaderMap) -> CourierResult<ApiResponse> {
        self.send(Method::PUT, path, Some(body), headers)
    }

    pub fn delete(&self, path: &str, headers: HeaderMap) -> CourierResult<ApiResponse> {
        self.send(Method::DELETE, path, None, headers)
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        headers: HeaderMap,
    ) -> CourierResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        let request = ApiRequest {
            method,
            url,
            headers,
            body,
        };
        let res = self.transport.send(request)?;
        debug!("{} -> HTTP {}", path, res.status);
        Ok(res)
    }
}

/// Headers for a JSON request body.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// `Authorization: Bearer <token>`. A missing token still produces the
/// header, with an empty token, and the server decides.
pub fn bearer_headers(token: Option<&str>) -> CourierResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = format!("Bearer {}", token.unwrap_or_default());
    let mut value = HeaderValue::from_str(&value)?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
