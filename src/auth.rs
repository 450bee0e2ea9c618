//! Auth resolution - turns the active auth variant into header/query additions

use base64::Engine;

use crate::compose::with_query_param;
use crate::error::ComposeError;
use crate::models::{ApiKeyLocation, AuthSpec};

/// What an auth variant adds to an outgoing request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthResolution {
    pub extra_headers: Vec<(String, String)>,
    /// Replacement URL when the credentials travel in the query string
    pub url_override: Option<String>,
}

/// Resolve `auth` against `base_url`.
///
/// Fields are never validated: an empty bearer token still yields an
/// `Authorization` header. The only failure is an API key destined for the
/// query string of a URL that cannot be parsed.
pub fn resolve(auth: &AuthSpec, base_url: &str) -> Result<AuthResolution, ComposeError> {
    let resolution = match auth {
        AuthSpec::None => AuthResolution::default(),
        AuthSpec::Bearer { token } => header("Authorization", format!("Bearer {}", token)),
        AuthSpec::Basic { username, password } => {
            let credentials = format!("{}:{}", username, password);
            let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
            header("Authorization", format!("Basic {}", encoded))
        }
        AuthSpec::ApiKey {
            key,
            value,
            location: ApiKeyLocation::Header,
        } => header(key, value.clone()),
        AuthSpec::ApiKey {
            key,
            value,
            location: ApiKeyLocation::Query,
        } => AuthResolution {
            extra_headers: Vec::new(),
            url_override: Some(with_query_param(base_url, key, value)?),
        },
    };
    Ok(resolution)
}

fn header(name: impl Into<String>, value: String) -> AuthResolution {
    AuthResolution {
        extra_headers: vec![(name.into(), value)],
        url_override: None,
    }
}
