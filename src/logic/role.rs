use serde_json::Value;

use crate::model::{RawRole, DEFAULT_ROLE};

/// Extract the bare role string from a user payload.
///
/// A string `role` is returned verbatim. An object `role` yields the first
/// defined property among `name`, `roleName`, `role`, `value`. Anything else,
/// including a missing user, yields [`DEFAULT_ROLE`]. Never fails.
pub fn resolve_role(user: Option<&Value>) -> String {
    user.and_then(|u| u.get("role"))
        .filter(|role| !role.is_null())
        .and_then(|role| serde_json::from_value::<RawRole>(role.clone()).ok())
        .as_ref()
        .and_then(RawRole::resolve)
        .unwrap_or(DEFAULT_ROLE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_role_shape_resolves() {
        let inputs = [
            json!({"role": "Admin"}),
            json!({"role": {"name": "Admin"}}),
            json!({"role": {"roleName": "Admin"}}),
            json!({"role": {"role": "Admin"}}),
            json!({"role": {"value": "Admin"}}),
        ];
        for user in &inputs {
            assert_eq!(resolve_role(Some(user)), "Admin", "input {}", user);
        }
    }

    #[test]
    fn test_missing_user_or_role_defaults_to_customer() {
        assert_eq!(resolve_role(None), "Customer");
        assert_eq!(resolve_role(Some(&json!({}))), "Customer");
        assert_eq!(resolve_role(Some(&json!({"role": {}}))), "Customer");
        assert_eq!(resolve_role(Some(&json!({"role": null}))), "Customer");
        assert_eq!(resolve_role(Some(&json!({"role": 7}))), "Customer");
        assert_eq!(resolve_role(Some(&json!("Admin"))), "Customer");
    }

    #[test]
    fn test_property_priority() {
        let user = json!({"role": {"value": "D", "role": "C", "roleName": "B", "name": "A"}});
        assert_eq!(resolve_role(Some(&user)), "A");

        let user = json!({"role": {"value": "D", "role": "C", "name": null}});
        assert_eq!(resolve_role(Some(&user)), "C");
    }

    #[test]
    fn test_string_role_is_verbatim() {
        assert_eq!(resolve_role(Some(&json!({"role": "restaurant_owner"}))), "restaurant_owner");
    }
}
