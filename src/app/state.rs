//! App state - pure data structure with no I/O logic

use crate::format::ResponseView;
use crate::messages::ui_events::AppTab;
use crate::messages::{DraftView, RenderState};
use crate::models::{ApiType, AuthForm, GraphQlRequest, KeyValueList, ResponseEnvelope, RestRequest};
use crate::settings::{Settings, SettingsStore};

/// Per-draft dispatch lifecycle.
///
/// `Idle`, `Completed` and `Failed` all accept a new send; `Sending` refuses
/// it until the matching response arrives.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DispatchState {
    #[default]
    Idle,
    Sending {
        request_id: u64,
    },
    Completed {
        envelope: ResponseEnvelope,
        time_ms: u64,
    },
    /// Refused before dispatch
    Failed(String),
}

impl DispatchState {
    pub fn is_sending(&self) -> bool {
        matches!(self, DispatchState::Sending { .. })
    }

    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            DispatchState::Completed { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    fn view(&self, settings: &Settings) -> DraftView {
        match self {
            DispatchState::Idle => DraftView::default(),
            DispatchState::Sending { .. } => DraftView {
                is_loading: true,
                ..DraftView::default()
            },
            DispatchState::Completed { envelope, time_ms } => DraftView {
                response: Some(ResponseView::new(envelope, settings, *time_ms)),
                ..DraftView::default()
            },
            DispatchState::Failed(message) => DraftView {
                error: Some(message.clone()),
                ..DraftView::default()
            },
        }
    }
}

/// A draft together with its dispatch state
#[derive(Clone, Debug, Default)]
pub struct DraftSlot<D> {
    pub draft: D,
    pub state: DispatchState,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub active_tab: AppTab,

    pub rest: DraftSlot<RestRequest>,
    pub graphql: DraftSlot<GraphQlRequest>,

    pub settings: SettingsStore,
    pub settings_error: Option<String>,

    pub next_request_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState::with_settings(SettingsStore::new())
    }

    pub fn with_settings(settings: SettingsStore) -> Self {
        AppState {
            active_tab: AppTab::Rest,
            rest: DraftSlot::default(),
            graphql: DraftSlot::default(),
            settings,
            settings_error: None,
            next_request_id: 1,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn dispatch_state(&self, api: ApiType) -> &DispatchState {
        match api {
            ApiType::Rest => &self.rest.state,
            ApiType::GraphQl => &self.graphql.state,
        }
    }

    pub(crate) fn dispatch_state_mut(&mut self, api: ApiType) -> &mut DispatchState {
        match api {
            ApiType::Rest => &mut self.rest.state,
            ApiType::GraphQl => &mut self.graphql.state,
        }
    }

    pub(crate) fn url_mut(&mut self, api: ApiType) -> &mut String {
        match api {
            ApiType::Rest => &mut self.rest.draft.url,
            ApiType::GraphQl => &mut self.graphql.draft.url,
        }
    }

    pub(crate) fn headers_mut(&mut self, api: ApiType) -> &mut KeyValueList {
        match api {
            ApiType::Rest => &mut self.rest.draft.headers,
            ApiType::GraphQl => &mut self.graphql.draft.headers,
        }
    }

    pub(crate) fn auth_mut(&mut self, api: ApiType) -> &mut AuthForm {
        match api {
            ApiType::Rest => &mut self.rest.draft.auth,
            ApiType::GraphQl => &mut self.graphql.draft.auth,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let settings = self.settings.current();
        RenderState {
            active_tab: self.active_tab,
            rest: self.rest.draft.clone(),
            rest_view: self.rest.state.view(settings),
            graphql: self.graphql.draft.clone(),
            graphql_view: self.graphql.state.view(settings),
            settings: settings.clone(),
            settings_error: self.settings_error.clone(),
        }
    }
}
