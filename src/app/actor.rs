//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor::with_state(AppState::new(), network_tx, render_tx)
    }

    pub fn with_state(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Transport starts from whatever settings the state was built with
        let _ = self
            .network_tx
            .send(NetworkCommand::Configure(self.state.settings.current().clone()));

        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),

            // Shared fields
            UiEvent::SetUrl { api, url } => self.state.set_url(api, url),
            UiEvent::AddHeader(api) => self.state.add_header(api),
            UiEvent::UpdateHeader { api, index, field, value } => {
                self.state.update_header(api, index, field, value)
            }
            UiEvent::RemoveHeader { api, index } => self.state.remove_header(api, index),
            UiEvent::SetAuthKind { api, kind } => self.state.set_auth_kind(api, kind),
            UiEvent::SetAuthField { api, field, value } => self.state.set_auth_field(api, field, value),
            UiEvent::SetApiKeyLocation { api, location } => {
                self.state.set_api_key_location(api, location)
            }

            // REST
            UiEvent::SetMethod(method) => self.state.set_method(method),
            UiEvent::CycleMethod => self.state.cycle_method(),
            UiEvent::SetBody(body) => self.state.set_body(body),
            UiEvent::AddParam => self.state.add_param(),
            UiEvent::UpdateParam { index, field, value } => self.state.update_param(index, field, value),
            UiEvent::RemoveParam(index) => self.state.remove_param(index),

            // GraphQL
            UiEvent::SetQuery(query) => self.state.set_query(query),
            UiEvent::SetVariables(variables) => self.state.set_variables(variables),
            UiEvent::SetOperationName(name) => self.state.set_operation_name(name),

            UiEvent::SendRequest => {
                if let Some(cmd) = self.state.send_active() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Settings
            UiEvent::UpdateSettings(settings) => {
                if let Some(cmd) = self.state.update_settings(settings) {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::ResetSettings => {
                let cmd = self.state.reset_settings();
                let _ = self.network_tx.send(cmd);
            }

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
