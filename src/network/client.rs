//! HTTP client wrapper - executes requests and captures the outcome

use std::future::Future;
use std::time::{Duration, Instant};

use crate::classify::parse_structured;
use crate::models::{Header, HttpMethod, HttpSuccess, RequestDescriptor, ResponseOutcome};

/// Anything able to put a request on the wire.
///
/// Transport errors are part of the returned outcome, never a panic or an
/// `Err`, so callers can always render what happened.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = ResponseOutcome> + Send;
}

/// Production transport backed by `reqwest`
#[derive(Clone, Debug)]
pub struct HttpExecutor {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpExecutor {
    pub fn new(timeout: Duration) -> Self {
        HttpExecutor {
            client: create_client(timeout),
            timeout,
        }
    }

    fn build_request(&self, request: &RequestDescriptor) -> reqwest::RequestBuilder {
        let mut req_builder = match request.method {
            HttpMethod::GET => self.client.get(&request.url),
            HttpMethod::POST => self.client.post(&request.url),
            HttpMethod::PUT => self.client.put(&request.url),
            HttpMethod::PATCH => self.client.patch(&request.url),
            HttpMethod::DELETE => self.client.delete(&request.url),
        };

        // `header` appends, so repeated keys all go out
        for header in &request.headers {
            req_builder = req_builder.header(header.key.as_str(), header.value.as_str());
        }

        // No body at all unless one was composed
        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        req_builder
    }

    fn describe_error(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("Request timed out after {:?}", self.timeout)
        } else if e.is_connect() {
            format!("Connection failed: {}", error_chain(e))
        } else if e.is_builder() {
            format!("Invalid request: {}", error_chain(e))
        } else {
            format!("Request failed: {}", error_chain(e))
        }
    }
}

impl Transport for HttpExecutor {
    async fn execute(&self, request: &RequestDescriptor) -> ResponseOutcome {
        tracing::info!(method = %request.method, url = %request.url, "Executing request");

        let start = Instant::now();
        let result = self.build_request(request).send().await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                let message = self.describe_error(&e);
                tracing::warn!(url = %request.url, error = %message, "Request failed");
                return ResponseOutcome::Failure { message };
            }
        };

        let status = resp.status().as_u16();
        let headers: Vec<Header> = resp
            .headers()
            .iter()
            .map(|(k, v)| Header::new(k.as_str(), String::from_utf8_lossy(v.as_bytes())))
            .collect();

        match resp.text().await {
            Ok(raw_body) => {
                tracing::info!(status, elapsed_ms, bytes = raw_body.len(), "Request completed");
                let structured = parse_structured(&raw_body);
                ResponseOutcome::Success(HttpSuccess {
                    status,
                    elapsed_ms,
                    raw_body,
                    headers,
                    structured,
                })
            }
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("Request timed out after {:?}", self.timeout)
                } else {
                    format!("Error reading body: {}", error_chain(&e))
                };
                tracing::warn!(url = %request.url, error = %message, "Reading body failed");
                ResponseOutcome::Failure { message }
            }
        }
    }
}

/// `reqwest` errors hide the useful part in their sources
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}
