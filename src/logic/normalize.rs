//! Response Normalizer: one function per response family, each accepting the
//! shapes the backend is known to send and producing the canonical one.
//! Unrecognized shapes are errors, never an empty result.

use serde_json::Value;

use crate::api::endpoints::{EndpointDef, ResponseShape};
use crate::api::ApiError;
use crate::model::{AuthSession, CanonicalUser, Page, RawUser};

const TOKEN_KEYS: [&str; 3] = ["accessToken", "access_token", "token"];
const REFRESH_KEYS: [&str; 2] = ["refreshToken", "refresh_token"];

/// Normalize a successful response body according to the endpoint's family
pub fn normalize_response(def: &EndpointDef, body: Value) -> Result<Value, ApiError> {
    let normalized = match def.response {
        ResponseShape::Raw => return Ok(body),
        ResponseShape::Page => to_value(def.name, normalize_page(def.name, body)?)?,
        ResponseShape::Auth => to_value(def.name, normalize_auth(def.name, &body)?)?,
        ResponseShape::User => to_value(def.name, normalize_user(def.name, body)?)?,
        ResponseShape::UserPage => {
            let page = normalize_page(def.name, body)?;
            let mut users = Vec::with_capacity(page.data.len());
            for raw in page.data.iter().cloned() {
                users.push(normalize_user(def.name, raw)?);
            }
            let users = Page {
                data: users,
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages,
            };
            to_value(def.name, users)?
        }
    };
    Ok(normalized)
}

/// Accept a bare array or a `{data, total, page, limit}` envelope.
///
/// Missing envelope fields default to `page = 1`, `limit = data.len()` and
/// `total = data.len()`; `totalPages` is always recomputed.
pub fn normalize_page(endpoint: &str, body: Value) -> Result<Page<Value>, ApiError> {
    match body {
        Value::Array(items) => Ok(Page::from_items(items)),
        Value::Object(mut envelope) => {
            let data = match envelope.remove("data") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(ApiError::shape(
                        endpoint,
                        format!("'data' must be an array, got {}", type_name(&other)),
                    ))
                }
                None => {
                    return Err(ApiError::shape(
                        endpoint,
                        "expected an array or an object with a 'data' array",
                    ))
                }
            };
            let len = data.len() as u64;
            let total = count_field(endpoint, &envelope, "total")?.unwrap_or(len);
            let page = count_field(endpoint, &envelope, "page")?.unwrap_or(1);
            let limit = count_field(endpoint, &envelope, "limit")?.unwrap_or(len);
            Ok(Page::new(data, total, page, limit))
        }
        other => Err(ApiError::shape(
            endpoint,
            format!("expected a list response, got {}", type_name(&other)),
        )),
    }
}

/// Accept `accessToken`, `access_token` or `token`, at the top level or under
/// `data`, and emit both `accessToken` and `token`.
pub fn normalize_auth(endpoint: &str, body: &Value) -> Result<AuthSession, ApiError> {
    let container = if first_string(body, &TOKEN_KEYS).is_some() {
        body
    } else {
        body.get("data")
            .filter(|data| first_string(data, &TOKEN_KEYS).is_some())
            .ok_or_else(|| {
                ApiError::shape(
                    endpoint,
                    "auth response carries none of accessToken, access_token, token",
                )
            })?
    };

    let token = first_string(container, &TOKEN_KEYS).unwrap_or_default();
    let refresh = first_string(container, &REFRESH_KEYS).map(str::to_string);
    let user = match container.get("user") {
        Some(Value::Null) | None => None,
        Some(user) => Some(normalize_user(endpoint, user.clone())?),
    };

    Ok(AuthSession::new(token.to_string(), refresh, user))
}

/// Accept a user object, optionally wrapped in `{user}` or `{data}`
pub fn normalize_user(endpoint: &str, body: Value) -> Result<CanonicalUser, ApiError> {
    let inner = match body {
        Value::Object(mut map) => match (map.remove("user"), map.remove("data")) {
            (Some(user @ Value::Object(_)), _) => user,
            (_, Some(data @ Value::Object(_))) => data,
            (user, data) => {
                if let Some(user) = user {
                    map.insert("user".to_string(), user);
                }
                if let Some(data) = data {
                    map.insert("data".to_string(), data);
                }
                Value::Object(map)
            }
        },
        other => {
            return Err(ApiError::shape(
                endpoint,
                format!("expected a user object, got {}", type_name(&other)),
            ))
        }
    };

    let raw: RawUser = serde_json::from_value(inner)
        .map_err(|e| ApiError::shape(endpoint, format!("malformed user: {}", e)))?;
    raw.into_canonical()
        .map_err(|detail| ApiError::shape(endpoint, detail))
}

fn first_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// Envelope counters arrive as numbers or numeric strings
fn count_field(
    endpoint: &str,
    envelope: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<Option<u64>, ApiError> {
    match envelope.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| ApiError::shape(endpoint, format!("'{}' must be a non-negative integer", field))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ApiError::shape(endpoint, format!("'{}' is not a number: {}", field, s))),
        Some(other) => Err(ApiError::shape(
            endpoint,
            format!("'{}' must be a number, got {}", field, type_name(other)),
        )),
    }
}

fn to_value<T: serde::Serialize>(endpoint: &str, value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::shape(endpoint, e.to_string()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
