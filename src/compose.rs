//! Wire composition: query parameters, header merging and GraphQL payloads.

use serde_json::{json, Value};
use url::Url;

use crate::error::ComposeError;
use crate::models::{GraphQlRequest, KeyValue, KeyValueList};

/// Attach the qualifying `params` to `base_url`.
///
/// With nothing to attach the base URL is returned untouched, even when it is
/// not a valid absolute URL. Otherwise each parameter overwrites any existing
/// query value with the same key, and new keys are appended in list order.
pub fn compose_url(base_url: &str, params: &KeyValueList) -> Result<String, ComposeError> {
    compose_with(base_url, params.qualifying())
}

/// Same merge rule as [`compose_url`] for a single parameter.
pub fn with_query_param(base_url: &str, key: &str, value: &str) -> Result<String, ComposeError> {
    let param = KeyValue::new(key, value);
    compose_with(base_url, Some(&param).filter(|p| p.is_qualifying()))
}

fn compose_with<'a>(
    base_url: &str,
    params: impl IntoIterator<Item = &'a KeyValue>,
) -> Result<String, ComposeError> {
    let pending: Vec<&KeyValue> = params.into_iter().collect();
    if pending.is_empty() {
        return Ok(base_url.to_string());
    }

    let mut url = Url::parse(base_url).map_err(|e| ComposeError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    for param in pending {
        set_pair(&mut pairs, &param.key, &param.value);
    }

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Ok(url.to_string())
}

/// First occurrence takes the value, later duplicates are dropped.
fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

/// Insert or replace a header, comparing names case-insensitively.
///
/// A replaced header keeps its original position and spelling.
pub fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
    {
        Some((_, existing)) => *existing = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

/// Qualifying rows of a header list, duplicates resolved to the last value.
pub fn collect_headers(entries: &KeyValueList) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(entries.len());
    for entry in entries.qualifying() {
        merge_header(&mut headers, &entry.key, &entry.value);
    }
    headers
}

/// JSON body of a GraphQL POST: `{query, variables, operationName?}`.
pub fn graphql_payload(request: &GraphQlRequest) -> Result<String, ComposeError> {
    let variables: Value = serde_json::from_str(&request.variables)
        .map_err(|e| ComposeError::VariablesParse(e.to_string()))?;

    let mut payload = json!({
        "query": request.query,
        "variables": variables,
    });
    let operation_name = request.operation_name.trim();
    if !operation_name.is_empty() {
        payload["operationName"] = Value::String(operation_name.to_string());
    }
    Ok(payload.to_string())
}
