//! Dispatcher - composes drafts into wire requests and normalizes the outcome
//!
//! Composition is synchronous and fails fast: an invalid URL or malformed
//! GraphQL variables stop the request before the transport is touched.
//! Execution never fails; unreachable servers become a status-0 envelope.

use std::collections::BTreeMap;

use crate::auth::resolve;
use crate::compose::{collect_headers, compose_url, graphql_payload, merge_header};
use crate::constants::{JSON_CONTENT_TYPE, TRANSPORT_ERROR_STATUS_TEXT};
use crate::error::{ComposeError, TransportError};
use crate::models::{ApiRequest, GraphQlRequest, HttpMethod, ResponseEnvelope, RestRequest, WireRequest};
use crate::network::transport::{Transport, TransportResponse};

/// Compose a REST draft.
///
/// User headers go first, auth headers override them. The body is passed
/// through verbatim for non-GET methods when it is non-empty; no content type
/// is implied.
pub fn prepare_rest(request: &RestRequest) -> Result<WireRequest, ComposeError> {
    let url = compose_url(&request.url, &request.params)?;
    let auth = resolve(&request.auth.active(), &url)?;

    let mut headers = collect_headers(&request.headers);
    for (name, value) in &auth.extra_headers {
        merge_header(&mut headers, name, value);
    }

    let body = (request.method.has_body() && !request.body.is_empty()).then(|| request.body.clone());

    Ok(WireRequest {
        method: request.method,
        url: auth.url_override.unwrap_or(url),
        headers,
        body,
    })
}

/// Compose a GraphQL draft: always a JSON POST.
pub fn prepare_graphql(request: &GraphQlRequest) -> Result<WireRequest, ComposeError> {
    let body = graphql_payload(request)?;
    let auth = resolve(&request.auth.active(), &request.url)?;

    let mut headers = collect_headers(&request.headers);
    merge_header(&mut headers, "Content-Type", JSON_CONTENT_TYPE);
    for (name, value) in &auth.extra_headers {
        merge_header(&mut headers, name, value);
    }

    Ok(WireRequest {
        method: HttpMethod::POST,
        url: auth.url_override.unwrap_or_else(|| request.url.clone()),
        headers,
        body: Some(body),
    })
}

pub fn prepare(request: &ApiRequest) -> Result<WireRequest, ComposeError> {
    match request {
        ApiRequest::Rest(rest) => prepare_rest(rest),
        ApiRequest::GraphQl(graphql) => prepare_graphql(graphql),
    }
}

/// Run a composed request and fold the result into an envelope
pub async fn execute<T: Transport + ?Sized>(transport: &T, request: &WireRequest) -> ResponseEnvelope {
    match transport.execute(request).await {
        Ok(response) => success_envelope(response),
        Err(e) => {
            tracing::warn!(url = %request.url, error = %e, "Server unreachable");
            failure_envelope(&e)
        }
    }
}

fn success_envelope(response: TransportResponse) -> ResponseEnvelope {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in response.headers {
        headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    ResponseEnvelope {
        status: response.status,
        status_text: response.status_text,
        headers,
        data: response.body,
    }
}

fn failure_envelope(error: &TransportError) -> ResponseEnvelope {
    ResponseEnvelope {
        status: 0,
        status_text: String::from(TRANSPORT_ERROR_STATUS_TEXT),
        headers: BTreeMap::new(),
        data: error.to_string(),
    }
}

/// Compose-and-send entry point over any transport
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Dispatcher { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Only composition errors are returned; transport failures come back as
    /// a status-0 envelope.
    pub async fn send(&self, request: &ApiRequest) -> Result<ResponseEnvelope, ComposeError> {
        let wire = prepare(request)?;
        tracing::info!(kind = ?request.api_type(), method = wire.method.as_str(), url = %wire.url, "Dispatching request");
        let envelope = execute(&self.transport, &wire).await;
        tracing::info!(status = envelope.status, "Request completed");
        Ok(envelope)
    }
}
