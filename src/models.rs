use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    DEFAULT_GRAPHQL_QUERY, DEFAULT_GRAPHQL_URL, DEFAULT_GRAPHQL_VARIABLES, DEFAULT_REST_URL,
    JSON_CONTENT_TYPE,
};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::GET,
        }
    }

    /// Every method except GET carries the draft body when it is non-empty.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }

    /// Replaying the request cannot duplicate side effects.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, HttpMethod::POST | HttpMethod::PATCH)
    }
}

/// Which half of a key/value row an edit targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Key,
    Value,
}

/// A header or query parameter row
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Both key and value are non-blank, so the row goes on the wire.
    pub fn is_qualifying(&self) -> bool {
        !self.key.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// Ordered header/param rows as edited in the UI.
///
/// Rows keep insertion order and may repeat keys. Blank rows stay in the list
/// and are only filtered out when the request is put on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValueList(Vec<KeyValue>);

impl KeyValueList {
    pub fn new() -> Self {
        KeyValueList(Vec::new())
    }

    pub fn entries(&self) -> &[KeyValue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an empty row
    pub fn add(&mut self) {
        self.0.push(KeyValue::default());
    }

    pub fn push(&mut self, entry: KeyValue) {
        self.0.push(entry);
    }

    /// Returns false when `index` is out of range.
    pub fn update(&mut self, index: usize, field: EntryField, value: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(entry) => {
                match field {
                    EntryField::Key => entry.key = value.into(),
                    EntryField::Value => entry.value = value.into(),
                }
                true
            }
            None => false,
        }
    }

    /// Returns false when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.0.len() {
            self.0.remove(index);
            true
        } else {
            false
        }
    }

    pub fn qualifying(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter().filter(|entry| entry.is_qualifying())
    }
}

impl From<Vec<KeyValue>> for KeyValueList {
    fn from(entries: Vec<KeyValue>) -> Self {
        KeyValueList(entries)
    }
}

/// Where an API key is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

/// Authentication strategy with the payload of the active variant only
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthSpec {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    ApiKey {
        key: String,
        value: String,
        location: ApiKeyLocation,
    },
}

/// Authentication type selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthKind {
    #[default]
    None,
    Bearer,
    Basic,
    ApiKey,
}

impl AuthKind {
    pub fn label(&self) -> &'static str {
        match self {
            AuthKind::None => "No Auth",
            AuthKind::Bearer => "Bearer Token",
            AuthKind::Basic => "Basic Auth",
            AuthKind::ApiKey => "API Key",
        }
    }
}

/// Auth text fields editable from the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    Token,
    Username,
    Password,
    ApiKeyName,
    ApiKeyValue,
}

/// Auth editor state.
///
/// Remembers the fields of every variant so that switching `kind` back and
/// forth never loses what the user typed. Only [`AuthForm::active`] reaches
/// the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthForm {
    pub kind: AuthKind,
    pub bearer_token: String,
    pub username: String,
    pub password: String,
    pub api_key: String,
    pub api_value: String,
    pub api_location: ApiKeyLocation,
}

impl AuthForm {
    pub fn set_kind(&mut self, kind: AuthKind) {
        self.kind = kind;
    }

    pub fn set_field(&mut self, field: AuthField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AuthField::Token => self.bearer_token = value,
            AuthField::Username => self.username = value,
            AuthField::Password => self.password = value,
            AuthField::ApiKeyName => self.api_key = value,
            AuthField::ApiKeyValue => self.api_value = value,
        }
    }

    pub fn set_location(&mut self, location: ApiKeyLocation) {
        self.api_location = location;
    }

    pub fn active(&self) -> AuthSpec {
        match self.kind {
            AuthKind::None => AuthSpec::None,
            AuthKind::Bearer => AuthSpec::Bearer {
                token: self.bearer_token.clone(),
            },
            AuthKind::Basic => AuthSpec::Basic {
                username: self.username.clone(),
                password: self.password.clone(),
            },
            AuthKind::ApiKey => AuthSpec::ApiKey {
                key: self.api_key.clone(),
                value: self.api_value.clone(),
                location: self.api_location,
            },
        }
    }
}

/// A REST request draft
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: KeyValueList,
    pub params: KeyValueList,
    pub body: String,
    pub auth: AuthForm,
}

impl Default for RestRequest {
    fn default() -> Self {
        RestRequest {
            method: HttpMethod::GET,
            url: String::from(DEFAULT_REST_URL),
            headers: vec![KeyValue::new("Content-Type", JSON_CONTENT_TYPE)].into(),
            params: vec![KeyValue::default()].into(),
            body: String::new(),
            auth: AuthForm::default(),
        }
    }
}

/// A GraphQL request draft
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    pub url: String,
    pub headers: KeyValueList,
    pub query: String,
    /// JSON text, parsed only when the request is sent
    pub variables: String,
    pub operation_name: String,
    pub auth: AuthForm,
}

impl Default for GraphQlRequest {
    fn default() -> Self {
        GraphQlRequest {
            url: String::from(DEFAULT_GRAPHQL_URL),
            headers: vec![KeyValue::new("Authorization", "Bearer YOUR_TOKEN")].into(),
            query: String::from(DEFAULT_GRAPHQL_QUERY),
            variables: String::from(DEFAULT_GRAPHQL_VARIABLES),
            operation_name: String::new(),
            auth: AuthForm::default(),
        }
    }
}

/// API flavour of a draft
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiType {
    Rest,
    GraphQl,
}

/// A draft tagged with its kind, as handed to the dispatcher
#[derive(Clone, Debug)]
pub enum ApiRequest {
    Rest(RestRequest),
    GraphQl(GraphQlRequest),
}

impl ApiRequest {
    pub fn api_type(&self) -> ApiType {
        match self {
            ApiRequest::Rest(_) => ApiType::Rest,
            ApiRequest::GraphQl(_) => ApiType::GraphQl,
        }
    }
}

/// A fully composed request, ready for the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl WireRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Normalized outcome of one dispatch.
///
/// `status == 0` means the server could not be reached; `data` then holds the
/// transport error message.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub data: String,
}

impl ResponseEnvelope {
    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_auth_kind_keeps_cached_fields() {
        let mut form = AuthForm::default();
        form.set_kind(AuthKind::Bearer);
        form.set_field(AuthField::Token, "abc");
        form.set_kind(AuthKind::Basic);
        form.set_field(AuthField::Username, "u");
        form.set_kind(AuthKind::Bearer);

        assert_eq!(form.active(), AuthSpec::Bearer { token: "abc".into() });
        assert_eq!(form.username, "u");
    }

    #[test]
    fn test_key_value_list_edits() {
        let mut params = KeyValueList::new();
        params.add();
        params.add();
        assert!(params.update(1, EntryField::Key, "q"));
        assert!(params.update(1, EntryField::Value, "1"));
        assert!(!params.update(5, EntryField::Key, "x"));

        assert_eq!(params.len(), 2);
        assert_eq!(params.qualifying().count(), 1);

        assert!(params.remove(0));
        assert!(!params.remove(3));
        assert_eq!(params.entries(), &[KeyValue::new("q", "1")]);
    }

    #[test]
    fn test_whitespace_entries_do_not_qualify() {
        assert!(!KeyValue::new("  ", "x").is_qualifying());
        assert!(!KeyValue::new("k", "\t").is_qualifying());
        assert!(KeyValue::new("k", "v").is_qualifying());
    }

    #[test]
    fn test_method_body_rules() {
        assert!(!HttpMethod::GET.has_body());
        assert!(HttpMethod::DELETE.has_body());
        assert_eq!(HttpMethod::PATCH.next(), HttpMethod::GET);
    }
}
