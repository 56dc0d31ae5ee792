use itertools::Itertools;
use serde_json::Value;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Every failure the client layer can report.
///
/// Cloneable so one deduplicated in-flight result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Caught before any network call
    #[error("{0}")]
    Validation(String),
    /// The backend answered 401; the cached token has been purged
    #[error("unauthorized: {message}")]
    Unauthorized { message: String, body: Value },
    /// Any other non-2xx answer; `body` is the server's error envelope, untouched
    #[error("server error {status}: {message}")]
    Server {
        status: u16,
        message: String,
        body: Value,
    },
    #[error("transport error: {0}")]
    Transport(String),
    /// The response matched none of the shapes the endpoint accepts
    #[error("unexpected response shape from '{endpoint}': {detail}")]
    Shape { endpoint: String, detail: String },
    #[error("unknown endpoint '{0}'")]
    UnknownEndpoint(String),
    #[error("session store error: {0}")]
    Session(String),
}

impl ApiError {
    /// Classify a non-2xx response
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = server_message(&body);
        if status == 401 {
            ApiError::Unauthorized {
                message: message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
                body,
            }
        } else {
            ApiError::Server {
                status,
                message: message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                body,
            }
        }
    }

    pub fn shape(endpoint: &str, detail: impl Into<String>) -> Self {
        ApiError::Shape {
            endpoint: endpoint.to_string(),
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// The single string the UI shows for this failure
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Validation(message)
            | ApiError::Unauthorized { message, .. }
            | ApiError::Server { message, .. } => message.clone(),
            ApiError::Transport(_)
            | ApiError::Shape { .. }
            | ApiError::UnknownEndpoint(_)
            | ApiError::Session(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Pull a display message out of an error envelope.
///
/// `message` may be a string, an array of strings, or an object of arrays
/// (field validation errors); all of them flatten into one joined string.
pub fn server_message(body: &Value) -> Option<String> {
    if let Value::String(text) = body {
        return non_empty(text.trim().to_string());
    }
    ["message", "error", "errors"]
        .iter()
        .filter_map(|key| body.get(*key))
        .map(|value| flatten_messages(value).into_iter().join(", "))
        .find_map(non_empty)
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Value::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        Value::Object(map) => map.values().flat_map(flatten_messages).collect(),
        _ => Vec::new(),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_as_string() {
        let err = ApiError::from_response(404, json!({"message": "Order not found"}));
        assert_eq!(err.display_message(), "Order not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_message_as_array() {
        let body = json!({"message": ["email must be an email", "password is too short"]});
        assert_eq!(
            server_message(&body).unwrap(),
            "email must be an email, password is too short"
        );
    }

    #[test]
    fn test_message_as_object_of_arrays() {
        let body = json!({"message": {"email": ["is taken"], "phone": ["is invalid", "is required"]}});
        assert_eq!(
            server_message(&body).unwrap(),
            "is taken, is invalid, is required"
        );
    }

    #[test]
    fn test_falls_back_to_error_key_then_generic() {
        assert_eq!(
            server_message(&json!({"error": "Bad Request"})).unwrap(),
            "Bad Request"
        );

        let err = ApiError::from_response(500, json!({"message": []}));
        assert_eq!(err.display_message(), GENERIC_ERROR_MESSAGE);
        match err {
            ApiError::Server { body, .. } => assert_eq!(body, json!({"message": []})),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_classification() {
        let err = ApiError::from_response(401, json!(null));
        assert!(err.is_unauthorized());
        assert_eq!(err.display_message(), SESSION_EXPIRED_MESSAGE);

        let envelope = json!({"message": "Token expired", "code": "TOKEN_EXPIRED"});
        match ApiError::from_response(401, envelope.clone()) {
            ApiError::Unauthorized { message, body } => {
                assert_eq!(message, "Token expired");
                assert_eq!(body, envelope);
            }
            other => panic!("expected unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_internal_errors_show_generic_message() {
        let err = ApiError::shape("get_orders", "data is not an array");
        assert_eq!(err.display_message(), GENERIC_ERROR_MESSAGE);
        assert!(err.to_string().contains("get_orders"));
    }
}
