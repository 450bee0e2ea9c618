//! Network actor - runs composed requests in the Tokio async runtime

use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::dispatch::execute;
use crate::network::transport::Transport;

/// Network actor that executes requests and reports their envelopes
pub struct NetworkActor<T> {
    transport: T,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<T: Transport + Clone + 'static> NetworkActor<T> {
    pub fn new(transport: T, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            transport,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, api, request }) => {
                            let response_tx = self.response_tx.clone();
                            let transport = self.transport.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, ?api, method = request.method.as_str(), url = %request.url, "Executing request");
                                let start = Instant::now();
                                let envelope = execute(&transport, &request).await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                tracing::info!(id, status = envelope.status, time_ms, "Request completed");
                                let _ = response_tx.send(NetworkResponse { id, api, envelope, time_ms });
                            });
                        }

                        Some(NetworkCommand::Configure(settings)) => {
                            tracing::info!("Reconfiguring transport");
                            self.transport.reconfigure(&settings);
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active_requests.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
