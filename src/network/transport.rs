//! Network call boundary - the only place a request touches the wire

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::WireRequest;
use crate::settings::Settings;

/// What the server sent back, any status code included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    /// Raw header lines; a name may repeat
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes composed requests.
///
/// Implementations report every HTTP response as `Ok`, including 4xx/5xx.
/// `Err` is reserved for failing to reach the server at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &WireRequest) -> Result<TransportResponse, TransportError>;

    /// Apply new settings to subsequent requests.
    fn reconfigure(&mut self, _settings: &Settings) {}
}
