//! Network layer - request composition, dispatch and HTTP execution
//!
//! The Network actor receives composed requests and sends back envelopes.

pub mod actor;
pub mod client;
pub mod dispatch;
pub mod transport;

pub use actor::NetworkActor;
pub use client::ReqwestTransport;
pub use dispatch::Dispatcher;
pub use transport::{Transport, TransportResponse};
