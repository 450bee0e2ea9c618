//! # zapi
//!
//! Request composition and dispatch core for a REST/GraphQL API client.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, PATCH
//! - Query parameters merged into the request URL
//! - Custom headers
//! - Auth support (Bearer, Basic, API key in header or query)
//! - GraphQL queries with variables and operation name
//! - JSON pretty-printing of responses
//! - Timeout, redirect, TLS validation and retry settings
//!
//! ## Architecture
//! Actor-based with channels:
//! - Presentation layer (external) - sends `UiEvent`, draws `RenderState`
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)
//!
//! [`Dispatcher`] and [`format`] can also be used directly without actors.

pub mod constants;
pub mod models;
pub mod settings;
pub mod error;
pub mod auth;
pub mod compose;
pub mod format;
pub mod messages;
pub mod app;
pub mod network;
pub mod telemetry;

// Re-export commonly used types
pub use models::{
    ApiKeyLocation, ApiRequest, ApiType, AuthForm, AuthKind, AuthSpec, GraphQlRequest, HttpMethod,
    KeyValue, KeyValueList, ResponseEnvelope, RestRequest, WireRequest,
};
pub use settings::{Settings, SettingsStore, Theme};
pub use error::{ComposeError, SendError, SettingsError, TransportError};
pub use auth::{resolve, AuthResolution};
pub use compose::compose_url;
pub use format::{classify, render, ResponseView, StatusClass};
pub use messages::{AppTab, NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState, DispatchState};
pub use network::{Dispatcher, NetworkActor, ReqwestTransport, Transport, TransportResponse};
