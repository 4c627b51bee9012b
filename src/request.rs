//! JSON over HTTP
//!
//! A thin wrapper around a blocking `reqwest` client. Failed requests are
//! reported to the user and turned into `None`; deciding whether that is fatal
//! is left to the caller.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::output;

const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A single JSON request
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Blocking JSON client
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let inner = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self { inner })
    }

    /// Send `request` and decode a JSON response
    ///
    /// Returns `None` on transport errors, non-2xx statuses and undecodable
    /// bodies. Each case is reported once before returning.
    pub fn send<T: DeserializeOwned>(&self, request: Request) -> Option<T> {
        let Request {
            method,
            url,
            body,
            headers,
        } = request;

        tracing::debug!(?method, %url, has_body = body.is_some(), "http request");

        let mut builder = self
            .inner
            .request(method.as_reqwest(), &url)
            .header(ACCEPT, "application/json");
        if let Some(body) = &body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }
        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        let response = match builder.send() {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, error = %err, "transport error");
                output::fail(format!("Error making request to {url}: {err}"));
                return None;
            }
        };

        let status = response.status();
        tracing::debug!(%status, %url, "http response");

        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            tracing::warn!(%status, %url, "request rejected");
            output::fail(format!(
                "Failed request to {url} ({status}): {}",
                describe_error_body(&text)
            ));
            return None;
        }

        match response.json::<T>() {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%url, error = %err, "undecodable response");
                output::fail(format!("Unexpected response from {url}: {err}"));
                None
            }
        }
    }
}

/// Render an error response body for humans
///
/// Jira answers with `{"errorMessages": [...], "errors": {field: message}}`;
/// those are flattened into one line. Other JSON is shown compactly and
/// anything else is shown as text.
pub fn describe_error_body(text: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return text.trim().to_string();
    };

    let mut parts: Vec<String> = Vec::new();
    if let Some(messages) = value.get("errorMessages").and_then(Value::as_array) {
        parts.extend(messages.iter().filter_map(Value::as_str).map(str::to_string));
    }
    if let Some(errors) = value.get("errors").and_then(Value::as_object) {
        for (field, message) in errors {
            match message.as_str() {
                Some(message) => parts.push(format!("{field}: {message}")),
                None => parts.push(format!("{field}: {message}")),
            }
        }
    }

    if parts.is_empty() {
        value.to_string()
    } else {
        parts.join("; ")
    }
}
