//! HTTP client wrapper - executes wire requests with reqwest

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;

use crate::constants::{MAX_REDIRECTS, RETRY_BACKOFF_MS};
use crate::error::TransportError;
use crate::models::{HttpMethod, WireRequest};
use crate::network::transport::{Transport, TransportResponse};
use crate::settings::Settings;

/// Production transport. Honors timeout, redirect, TLS validation and retry
/// settings.
///
/// Connection failures are retried for every method. Timeouts are retried
/// only for idempotent methods, since a timed-out POST or PATCH may already
/// have been applied by the server.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout_ms: u64,
    max_retries: u8,
}

impl ReqwestTransport {
    pub fn from_settings(settings: &Settings) -> Self {
        ReqwestTransport {
            client: create_client(settings),
            timeout_ms: settings.timeout_ms,
            max_retries: settings.max_retries,
        }
    }

    async fn execute_once(&self, request: &WireRequest) -> Result<TransportResponse, TransportError> {
        let resp = build_request(&self.client, request)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = resp.status();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Body(describe(&e)))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else if e.is_connect() {
            TransportError::Connect(describe(&e))
        } else {
            TransportError::Other(describe(&e))
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        ReqwestTransport::from_settings(&Settings::default())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &WireRequest) -> Result<TransportResponse, TransportError> {
        let mut attempt: u8 = 0;
        loop {
            match self.execute_once(request).await {
                Err(e) if should_retry(request.method, &e) && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, max_retries = self.max_retries, error = %e, "Transport failure, retrying");
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt))).await;
                }
                result => return result,
            }
        }
    }

    fn reconfigure(&mut self, settings: &Settings) {
        *self = ReqwestTransport::from_settings(settings);
    }
}

fn should_retry(method: HttpMethod, error: &TransportError) -> bool {
    match error {
        TransportError::Timeout { .. } => method.is_idempotent(),
        other => other.is_retryable(),
    }
}

/// Build a reqwest request from a composed wire request
fn build_request(client: &reqwest::Client, request: &WireRequest) -> reqwest::RequestBuilder {
    let mut req_builder = match request.method {
        HttpMethod::GET => client.get(&request.url),
        HttpMethod::POST => client.post(&request.url),
        HttpMethod::PUT => client.put(&request.url),
        HttpMethod::PATCH => client.patch(&request.url),
        HttpMethod::DELETE => client.delete(&request.url),
    };

    for (key, value) in &request.headers {
        req_builder = req_builder.header(key, value);
    }

    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    req_builder
}

/// reqwest keeps the useful detail in the source chain
fn describe(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Create an HTTP client from the current settings
fn create_client(settings: &Settings) -> reqwest::Client {
    let redirect = if settings.follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    reqwest::Client::builder()
        .timeout(Duration::from_millis(settings.timeout_ms))
        .redirect(redirect)
        .danger_accept_invalid_certs(!settings.validate_ssl)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_carries_method_headers_and_body() {
        let client = reqwest::Client::new();
        let wire = WireRequest {
            method: HttpMethod::PATCH,
            url: "https://example.com/items/1".into(),
            headers: vec![("X-Trace".into(), "abc".into())],
            body: Some("{\"done\":true}".into()),
        };
        let built = build_request(&client, &wire).build().unwrap();
        assert_eq!(built.method(), reqwest::Method::PATCH);
        assert_eq!(built.url().as_str(), "https://example.com/items/1");
        assert_eq!(built.headers()["x-trace"], "abc");
        assert_eq!(
            built.body().and_then(|b| b.as_bytes()),
            Some(&b"{\"done\":true}"[..])
        );
    }

    #[test]
    fn test_reconfigure_picks_up_new_limits() {
        let mut transport = ReqwestTransport::default();
        assert_eq!(transport.max_retries, 3);

        let settings = Settings {
            timeout_ms: 20_000,
            max_retries: 0,
            ..Settings::default()
        };
        transport.reconfigure(&settings);
        assert_eq!(transport.timeout_ms, 20_000);
        assert_eq!(transport.max_retries, 0);
    }

    #[test]
    fn test_timeouts_only_retried_for_idempotent_methods() {
        let timeout = TransportError::Timeout { timeout_ms: 1000 };
        let refused = TransportError::Connect("refused".into());

        assert!(should_retry(HttpMethod::GET, &timeout));
        assert!(should_retry(HttpMethod::PUT, &timeout));
        assert!(should_retry(HttpMethod::DELETE, &timeout));
        assert!(!should_retry(HttpMethod::POST, &timeout));
        assert!(!should_retry(HttpMethod::PATCH, &timeout));

        assert!(should_retry(HttpMethod::POST, &refused));
        assert!(!should_retry(HttpMethod::GET, &TransportError::Other("bad".into())));
    }
}
