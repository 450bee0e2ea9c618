//! Real HTTP round trips through `ReqwestTransport` against a local axum server.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use zapi::models::{AuthField, KeyValue};
use zapi::{
    classify, render, ApiKeyLocation, ApiRequest, AuthKind, Dispatcher, GraphQlRequest, HttpMethod,
    ReqwestTransport, RestRequest, Settings, StatusClass,
};

async fn pokemon() -> impl IntoResponse {
    (StatusCode::OK, [("x-custom", "1")], r#"{"name":"pikachu","id":25}"#)
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nope")
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    Json(json!({
        "authorization": header("authorization"),
        "contentType": header("content-type"),
        "body": body,
    }))
}

async fn search(RawQuery(query): RawQuery) -> String {
    query.unwrap_or_default()
}

async fn slow(State(hits): State<Arc<AtomicUsize>>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    "late"
}

async fn spawn_server() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/pokemon", get(pokemon))
        .route("/missing", get(missing))
        .route("/echo", post(echo))
        .route("/search", get(search))
        .route("/redirect", get(|| async { Redirect::temporary("/pokemon") }))
        .route("/slow", get(slow).post(slow))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hits)
}

fn rest_get(url: String) -> RestRequest {
    RestRequest {
        method: HttpMethod::GET,
        url,
        ..RestRequest::default()
    }
}

fn dispatcher(settings: Settings) -> Dispatcher<ReqwestTransport> {
    Dispatcher::new(ReqwestTransport::from_settings(&settings))
}

#[tokio::test]
async fn rest_get_captures_status_headers_and_raw_body() {
    let (addr, _) = spawn_server().await;
    let request = rest_get(format!("http://{addr}/pokemon"));

    let envelope = dispatcher(Settings::default())
        .send(&ApiRequest::Rest(request))
        .await
        .unwrap();

    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.status_text, "OK");
    assert_eq!(envelope.headers.get("x-custom").map(String::as_str), Some("1"));
    assert_eq!(envelope.data, r#"{"name":"pikachu","id":25}"#);
    assert_eq!(
        render(&envelope, true),
        "{\n  \"name\": \"pikachu\",\n  \"id\": 25\n}"
    );
}

#[tokio::test]
async fn client_errors_are_ordinary_envelopes() {
    let (addr, _) = spawn_server().await;
    let request = rest_get(format!("http://{addr}/missing"));

    let envelope = dispatcher(Settings::default())
        .send(&ApiRequest::Rest(request))
        .await
        .unwrap();

    assert_eq!(envelope.status, 404);
    assert_eq!(envelope.status_text, "Not Found");
    assert_eq!(envelope.data, "nope");
    assert_eq!(classify(envelope.status), StatusClass::ClientOrServerError);
}

#[tokio::test]
async fn params_and_query_api_key_reach_the_server() {
    let (addr, _) = spawn_server().await;
    let mut request = rest_get(format!("http://{addr}/search"));
    request.params = vec![KeyValue::new("q", "1"), KeyValue::new("", "ignored")].into();
    request.auth.set_kind(AuthKind::ApiKey);
    request.auth.set_field(AuthField::ApiKeyName, "api_key");
    request.auth.set_field(AuthField::ApiKeyValue, "k");
    request.auth.set_location(ApiKeyLocation::Query);

    let envelope = dispatcher(Settings::default())
        .send(&ApiRequest::Rest(request))
        .await
        .unwrap();

    assert_eq!(envelope.data, "q=1&api_key=k");
}

#[tokio::test]
async fn graphql_posts_json_with_auth() {
    let (addr, _) = spawn_server().await;
    let mut request = GraphQlRequest {
        url: format!("http://{addr}/echo"),
        headers: vec![KeyValue::new("Content-Type", "text/plain")].into(),
        query: "query Ping { ping }".into(),
        variables: r#"{"n": 1}"#.into(),
        operation_name: "Ping".into(),
        ..GraphQlRequest::default()
    };
    request.auth.set_kind(AuthKind::Basic);
    request.auth.set_field(AuthField::Username, "u");
    request.auth.set_field(AuthField::Password, "p");

    let envelope = dispatcher(Settings::default())
        .send(&ApiRequest::GraphQl(request))
        .await
        .unwrap();

    let echoed: Value = serde_json::from_str(&envelope.data).unwrap();
    assert_eq!(echoed["authorization"], "Basic dTpw");
    assert_eq!(echoed["contentType"], "application/json");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({"query": "query Ping { ping }", "variables": {"n": 1}, "operationName": "Ping"})
    );
}

#[tokio::test]
async fn redirect_policy_follows_settings() {
    let (addr, _) = spawn_server().await;
    let url = format!("http://{addr}/redirect");

    let followed = dispatcher(Settings::default())
        .send(&ApiRequest::Rest(rest_get(url.clone())))
        .await
        .unwrap();
    assert_eq!(followed.status, 200);

    let no_follow = Settings {
        follow_redirects: false,
        ..Settings::default()
    };
    let stopped = dispatcher(no_follow)
        .send(&ApiRequest::Rest(rest_get(url)))
        .await
        .unwrap();
    assert_eq!(stopped.status, 307);
    assert_eq!(classify(stopped.status), StatusClass::Other);
}

#[tokio::test]
async fn unreachable_server_yields_status_zero() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = Settings {
        max_retries: 0,
        ..Settings::default()
    };
    let envelope = dispatcher(settings)
        .send(&ApiRequest::Rest(rest_get(format!("http://{addr}/"))))
        .await
        .unwrap();

    assert_eq!(envelope.status, 0);
    assert_eq!(envelope.status_text, "Error");
    assert!(envelope.headers.is_empty());
    assert!(envelope.data.starts_with("Connection failed"), "{}", envelope.data);
}

#[tokio::test]
async fn malformed_url_without_params_is_passed_through() {
    let mut request = rest_get("not a url".into());
    request.params = Default::default();

    let envelope = dispatcher(Settings::default())
        .send(&ApiRequest::Rest(request))
        .await
        .unwrap();

    assert_eq!(envelope.status, 0);
    assert!(envelope.data.starts_with("Request failed"), "{}", envelope.data);
}

#[tokio::test]
async fn timeouts_are_retried_up_to_max_retries() {
    let (addr, hits) = spawn_server().await;
    let settings = Settings {
        timeout_ms: 1000,
        max_retries: 1,
        ..Settings::default()
    };

    let envelope = dispatcher(settings)
        .send(&ApiRequest::Rest(rest_get(format!("http://{addr}/slow"))))
        .await
        .unwrap();

    assert_eq!(envelope.status, 0);
    assert_eq!(envelope.data, "Request timed out (1000ms)");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn timed_out_post_is_not_replayed() {
    let (addr, hits) = spawn_server().await;
    let settings = Settings {
        timeout_ms: 1000,
        max_retries: 3,
        ..Settings::default()
    };
    let mut request = rest_get(format!("http://{addr}/slow"));
    request.method = HttpMethod::POST;
    request.body = "order".into();

    let envelope = dispatcher(settings)
        .send(&ApiRequest::Rest(request))
        .await
        .unwrap();

    assert_eq!(envelope.status, 0);
    assert_eq!(envelope.data, "Request timed out (1000ms)");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rest_post_body_is_sent_without_injected_content_type() {
    let (addr, _) = spawn_server().await;
    let request = RestRequest {
        method: HttpMethod::POST,
        url: format!("http://{addr}/echo"),
        headers: Default::default(),
        body: r#"{"a":1}"#.into(),
        ..RestRequest::default()
    };

    let envelope = dispatcher(Settings::default())
        .send(&ApiRequest::Rest(request))
        .await
        .unwrap();

    let echoed: Value = serde_json::from_str(&envelope.data).unwrap();
    assert_eq!(echoed["contentType"], "");
    assert_eq!(echoed["body"], r#"{"a":1}"#);
}
