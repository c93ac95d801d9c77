//! HTTP transport to the editor extension's tool server.
//!
//! ApiRequest (method + path + optional JSON body) -> EditorClient::send ->
//! decoded JSON value, or a TransportError carrying one descriptive message.
//! One attempt per request, bounded by `REQUEST_TIMEOUT`; nothing is retried.
//!
pub mod port;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::{log_debug, log_info};

pub const DEFAULT_HOST: &str = "127.0.0.1";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const EDITOR_HINT: &str = "Is Cocos Creator running with the extension?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One call against the tool server.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path on the server, e.g. `/cocos/health`.
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-2xx reply. `message` is the body's `error` field, or the raw body.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Connection error: {reason}. {hint}", hint = EDITOR_HINT)]
    Connect { reason: String },

    #[error("Request timed out after {}s. {hint}", .0.as_secs(), hint = EDITOR_HINT)]
    Timeout(Duration),

    #[error("invalid JSON in response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Build `http://<host>:<port>/`. Bare IPv6 literals are bracketed; a host
/// carrying a path, query or credentials is rejected.
pub fn base_url(host: &str, port: u16) -> Result<Url, url::ParseError> {
    let host = host.trim();
    let authority = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    let url = Url::parse(&format!("http://{authority}"))?;
    if url.path() != "/"
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
    {
        return Err(url::ParseError::InvalidDomainCharacter);
    }
    Ok(url)
}

/// Client for the editor's tool server. Every request carries JSON
/// `Content-Type` and `Accept` headers.
#[derive(Debug, Clone)]
pub struct EditorClient {
    base_url: Url,
    http: reqwest::Client,
}

impl EditorClient {
    pub fn new(base_url: Url) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // The editor is reached directly; proxy environment variables are ignored.
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .no_proxy()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Perform the request. `Ok(None)` means the server answered 2xx with an
    /// empty body.
    pub async fn send(&self, request: &ApiRequest) -> Result<Option<Value>, TransportError> {
        let url = self.endpoint(&request.path);
        log_info!("{} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        if let Some(body) = &request.body {
            log_debug!("request body: {body}");
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let text = response.text().await.map_err(classify)?;
        log_debug!("response: {status} ({} bytes)", text.len());

        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        decode_body(&text)
    }
}

fn decode_body(text: &str) -> Result<Option<Value>, TransportError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(TransportError::InvalidResponse)
}

/// Message for a non-2xx body: the JSON `error` field when present,
/// otherwise the body verbatim.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("error") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(REQUEST_TIMEOUT);
    }
    if err.is_builder() {
        return TransportError::Client(err);
    }
    TransportError::Connect {
        reason: root_cause(&err),
    }
}

/// Innermost error message (e.g. "Connection refused (os error 111)").
fn root_cause(err: &reqwest::Error) -> String {
    let mut current: &dyn std::error::Error = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}
