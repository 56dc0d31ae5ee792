use itertools::Itertools;
use serde_json::Value;

use crate::api::endpoints::{EndpointDef, ParamKind};
use crate::api::ApiError;
use crate::model::is_uuid;

/// Check arguments against the endpoint's parameter contract before any
/// network call. All problems are reported together in one message.
pub fn validate_args(def: &EndpointDef, args: &Value) -> Result<(), ApiError> {
    let empty = serde_json::Map::new();
    let map = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            return Err(ApiError::Validation(format!(
                "arguments for {} must be an object, got {}",
                def.name, other
            )))
        }
    };

    let problems: Vec<String> = def
        .params
        .iter()
        .filter_map(|spec| {
            let label = humanize(spec.name);
            match map.get(spec.name) {
                None | Some(Value::Null) => spec.required.then(|| format!("{} is required", label)),
                Some(value) if spec.required && is_blank(value) => {
                    Some(format!("{} is required", label))
                }
                Some(value) => check_kind(spec.kind, value).err().map(|e| format!("{} {}", label, e)),
            }
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(problems.into_iter().join(", ")))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn check_kind(kind: ParamKind, value: &Value) -> Result<(), &'static str> {
    let ok = match kind {
        ParamKind::Text => matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)),
        ParamKind::Uuid => value.as_str().is_some_and(is_uuid),
        ParamKind::Number => match value {
            Value::Number(_) => true,
            Value::String(s) => s.trim().parse::<f64>().is_ok(),
            _ => false,
        },
        ParamKind::Bool => value.is_boolean(),
        ParamKind::Object => value.is_object(),
        ParamKind::List => value.is_array(),
    };
    if ok {
        return Ok(());
    }
    Err(match kind {
        ParamKind::Text => "must be text",
        ParamKind::Uuid => "must be a valid ID",
        ParamKind::Number => "must be a number",
        ParamKind::Bool => "must be true or false",
        ParamKind::Object => "must be an object",
        ParamKind::List => "must be a list",
    })
}

/// `postalCode` -> `Postal code`
fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::Registry;
    use serde_json::json;

    fn def(name: &str) -> &'static EndpointDef {
        Registry::standard().get(name).unwrap()
    }

    #[test]
    fn test_valid_address() {
        let args = json!({
            "userId": "7f1d3f6e-8a3b-4c55-9d2e-2b1f0c9e4a11",
            "street": "1 Main St",
            "city": "Springfield",
            "country": "US"
        });
        assert!(validate_args(def("create_address"), &args).is_ok());
    }

    #[test]
    fn test_address_with_bad_user_id_fails_fast() {
        let args = json!({"userId": "42", "street": "1 Main St", "city": "Springfield", "country": "US"});
        assert_eq!(
            validate_args(def("create_address"), &args),
            Err(ApiError::Validation("User id must be a valid ID".to_string()))
        );
    }

    #[test]
    fn test_missing_fields_are_reported_together() {
        let args = json!({"userId": "7f1d3f6e-8a3b-4c55-9d2e-2b1f0c9e4a11", "street": "  "});
        let err = validate_args(def("create_address"), &args).unwrap_err();
        assert_eq!(
            err.display_message(),
            "Street is required, City is required, Country is required"
        );
    }

    #[test]
    fn test_kind_checks() {
        let err = validate_args(
            def("create_order"),
            &json!({"restaurantId": "r1", "items": {"m1": 2}}),
        )
        .unwrap_err();
        assert_eq!(err.display_message(), "Items must be a list");

        let err = validate_args(def("create_order"), &json!({"restaurantId": "r1", "items": []}))
            .unwrap_err();
        assert_eq!(err.display_message(), "Items is required");

        assert!(validate_args(def("get_orders"), &json!({"page": "2"})).is_ok());
        assert!(validate_args(def("get_orders"), &json!({"page": "two"})).is_err());
    }

    #[test]
    fn test_null_args_and_extra_keys() {
        assert!(validate_args(def("get_profile"), &Value::Null).is_ok());
        assert!(validate_args(def("get_orders"), &json!({"sort": "createdAt"})).is_ok());
        assert!(validate_args(def("get_order"), &Value::Null).is_err());
        assert!(validate_args(def("get_order"), &json!("o1")).is_err());
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("postalCode"), "Postal code");
        assert_eq!(humanize("id"), "Id");
    }
}
