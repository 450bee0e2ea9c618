//! UI events - messages from UI layer to App layer

use crate::models::{ApiKeyLocation, ApiType, AuthField, AuthKind, EntryField, HttpMethod};
use crate::settings::Settings;

/// Application tabs
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AppTab {
    #[default]
    Rest,
    GraphQl,
    /// Placeholder, nothing can be sent from it
    WebSocket,
}

impl AppTab {
    pub fn api_type(&self) -> Option<ApiType> {
        match self {
            AppTab::Rest => Some(ApiType::Rest),
            AppTab::GraphQl => Some(ApiType::GraphQl),
            AppTab::WebSocket => None,
        }
    }
}

/// Edits and actions coming from the presentation layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    SwitchTab(AppTab),

    // Fields shared by both drafts
    SetUrl { api: ApiType, url: String },
    AddHeader(ApiType),
    UpdateHeader {
        api: ApiType,
        index: usize,
        field: EntryField,
        value: String,
    },
    RemoveHeader { api: ApiType, index: usize },
    SetAuthKind { api: ApiType, kind: AuthKind },
    SetAuthField {
        api: ApiType,
        field: AuthField,
        value: String,
    },
    SetApiKeyLocation { api: ApiType, location: ApiKeyLocation },

    // REST draft
    SetMethod(HttpMethod),
    CycleMethod,
    SetBody(String),
    AddParam,
    UpdateParam {
        index: usize,
        field: EntryField,
        value: String,
    },
    RemoveParam(usize),

    // GraphQL draft
    SetQuery(String),
    SetVariables(String),
    SetOperationName(String),

    /// Send the draft of the active tab
    SendRequest,

    // Settings
    UpdateSettings(Settings),
    ResetSettings,

    // System
    Quit,
}
