//! Network messages - communication between App and Network layers

use crate::models::{ApiType, ResponseEnvelope, WireRequest};
use crate::settings::Settings;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute a composed request
    Execute {
        id: u64,
        api: ApiType,
        request: WireRequest,
    },
    /// Rebuild the transport from new settings
    Configure(Settings),
    /// Shutdown the network actor
    Shutdown,
}

/// Sent from Network layer to App layer once a request has finished,
/// whether the server answered or not
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub id: u64,
    pub api: ApiType,
    pub envelope: ResponseEnvelope,
    pub time_ms: u64,
}
