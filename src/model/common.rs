use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub type Id = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Mutating verbs carry their arguments as a JSON body instead of a query string
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Render a scalar JSON value the way it travels in a path segment or query string.
/// Objects and arrays are not scalars and yield `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deterministic signature for an argument object.
///
/// serde_json keeps object keys sorted, so two argument objects with the same
/// content always serialize to the same bytes regardless of insertion order.
pub fn args_signature(endpoint: &str, args: &Value) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(format!("endpoint:{}\n", endpoint));
    hasher.update(format!("args:{}\n", args));
    let digest = hasher.finalize();

    // 8 bytes is plenty to tell argument sets of one endpoint apart
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_args_signature_ignores_key_order() {
        let a: Value = serde_json::from_str(r#"{"page": 1, "status": "Pending"}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"status": "Pending", "page": 1}"#).unwrap();

        assert_eq!(args_signature("get_orders", &a), args_signature("get_orders", &b));
        assert_eq!(args_signature("get_orders", &a).len(), 16);
    }

    #[test]
    fn test_args_signature_depends_on_endpoint() {
        let args = json!({"id": "o1"});
        assert_ne!(
            args_signature("get_order", &args),
            args_signature("get_user", &args)
        );
    }

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(scalar_to_string(&json!("abc")), Some("abc".to_string()));
        assert_eq!(scalar_to_string(&json!(3)), Some("3".to_string()));
        assert_eq!(scalar_to_string(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_to_string(&json!(null)), None);
        assert_eq!(scalar_to_string(&json!({"a": 1})), None);
    }

    #[test]
    fn test_uuid_check() {
        assert!(is_uuid("7f1d3f6e-8a3b-4c55-9d2e-2b1f0c9e4a11"));
        assert!(!is_uuid("user-42"));
    }
}
