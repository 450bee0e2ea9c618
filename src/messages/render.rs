//! Render state - data structure sent from App layer to UI for rendering

use crate::format::ResponseView;
use crate::messages::ui_events::AppTab;
use crate::models::{GraphQlRequest, RestRequest};
use crate::settings::Settings;

/// Dispatch status of one draft as the UI shows it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftView {
    /// Send affordance is disabled while true
    pub is_loading: bool,
    pub response: Option<ResponseView>,
    /// Validation message when the last send was refused
    pub error: Option<String>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_tab: AppTab,

    pub rest: RestRequest,
    pub rest_view: DraftView,

    pub graphql: GraphQlRequest,
    pub graphql_view: DraftView,

    pub settings: Settings,
    pub settings_error: Option<String>,
}
