//! Command handlers - business logic for processing UI events

use crate::app::state::DispatchState;
use crate::app::AppState;
use crate::error::SendError;
use crate::messages::ui_events::AppTab;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ApiKeyLocation, ApiType, AuthField, AuthKind, EntryField, HttpMethod};
use crate::network::dispatch::{prepare_graphql, prepare_rest};
use crate::settings::Settings;

impl AppState {
    // ========================
    // Tab navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
    }

    // ========================
    // Shared draft fields
    // ========================

    pub fn set_url(&mut self, api: ApiType, url: String) {
        *self.url_mut(api) = url;
    }

    pub fn add_header(&mut self, api: ApiType) {
        self.headers_mut(api).add();
    }

    pub fn update_header(&mut self, api: ApiType, index: usize, field: EntryField, value: String) {
        if !self.headers_mut(api).update(index, field, value) {
            tracing::debug!(?api, index, "Ignoring edit of missing header row");
        }
    }

    pub fn remove_header(&mut self, api: ApiType, index: usize) {
        if !self.headers_mut(api).remove(index) {
            tracing::debug!(?api, index, "Ignoring removal of missing header row");
        }
    }

    pub fn set_auth_kind(&mut self, api: ApiType, kind: AuthKind) {
        self.auth_mut(api).set_kind(kind);
    }

    pub fn set_auth_field(&mut self, api: ApiType, field: AuthField, value: String) {
        self.auth_mut(api).set_field(field, value);
    }

    pub fn set_api_key_location(&mut self, api: ApiType, location: ApiKeyLocation) {
        self.auth_mut(api).set_location(location);
    }

    // ========================
    // REST draft
    // ========================

    pub fn set_method(&mut self, method: HttpMethod) {
        self.rest.draft.method = method;
    }

    pub fn cycle_method(&mut self) {
        self.rest.draft.method = self.rest.draft.method.next();
    }

    pub fn set_body(&mut self, body: String) {
        self.rest.draft.body = body;
    }

    pub fn add_param(&mut self) {
        self.rest.draft.params.add();
    }

    pub fn update_param(&mut self, index: usize, field: EntryField, value: String) {
        if !self.rest.draft.params.update(index, field, value) {
            tracing::debug!(index, "Ignoring edit of missing param row");
        }
    }

    pub fn remove_param(&mut self, index: usize) {
        if !self.rest.draft.params.remove(index) {
            tracing::debug!(index, "Ignoring removal of missing param row");
        }
    }

    // ========================
    // GraphQL draft
    // ========================

    pub fn set_query(&mut self, query: String) {
        self.graphql.draft.query = query;
    }

    pub fn set_variables(&mut self, variables: String) {
        self.graphql.draft.variables = variables;
    }

    pub fn set_operation_name(&mut self, operation_name: String) {
        self.graphql.draft.operation_name = operation_name;
    }

    // ========================
    // Request sending
    // ========================

    /// Compose the draft and move it to `Sending`.
    ///
    /// Refused while a previous send of the same draft is pending. A
    /// composition error marks the draft `Failed` and nothing is sent.
    pub fn begin_send(&mut self, api: ApiType) -> Result<NetworkCommand, SendError> {
        if self.dispatch_state(api).is_sending() {
            tracing::warn!(?api, "Send refused, request already in flight");
            return Err(SendError::InFlight);
        }

        let prepared = match api {
            ApiType::Rest => prepare_rest(&self.rest.draft),
            ApiType::GraphQl => prepare_graphql(&self.graphql.draft),
        };

        match prepared {
            Ok(request) => {
                let id = self.next_id();
                *self.dispatch_state_mut(api) = DispatchState::Sending { request_id: id };
                Ok(NetworkCommand::Execute { id, api, request })
            }
            Err(e) => {
                tracing::warn!(?api, error = %e, "Request not sent");
                *self.dispatch_state_mut(api) = DispatchState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Send whatever draft the active tab shows
    pub fn send_active(&mut self) -> Option<NetworkCommand> {
        let Some(api) = self.active_tab.api_type() else {
            tracing::debug!("WebSocket tab has no send action");
            return None;
        };
        self.begin_send(api).ok()
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let state = self.dispatch_state_mut(response.api);
        let is_pending = matches!(*state, DispatchState::Sending { request_id } if request_id == response.id);
        if is_pending {
            *state = DispatchState::Completed {
                envelope: response.envelope,
                time_ms: response.time_ms,
            };
        } else {
            tracing::debug!(id = response.id, api = ?response.api, "Dropping response for stale request");
        }
    }

    // ========================
    // Settings
    // ========================

    /// Returns the command that reconfigures the transport when accepted.
    pub fn update_settings(&mut self, settings: Settings) -> Option<NetworkCommand> {
        match self.settings.replace(settings) {
            Ok(()) => {
                self.settings_error = None;
                Some(NetworkCommand::Configure(self.settings.current().clone()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Settings rejected");
                self.settings_error = Some(e.to_string());
                None
            }
        }
    }

    pub fn reset_settings(&mut self) -> NetworkCommand {
        self.settings.reset();
        self.settings_error = None;
        NetworkCommand::Configure(self.settings.current().clone())
    }
}
