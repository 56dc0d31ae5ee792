use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{scalar_to_string, Id, StatusField};

/// Role assigned to users whose payload carries no usable role
pub const DEFAULT_ROLE: &str = "Customer";

/// Role object shapes seen across backend versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "roleName", skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RoleObject {
    /// First defined property in priority order
    pub fn first_defined(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.role_name.as_deref())
            .or(self.role.as_deref())
            .or(self.value.as_deref())
    }
}

/// `role` as it arrives on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRole {
    Name(String),
    Object(RoleObject),
    Other(Value),
}

impl RawRole {
    pub fn resolve(&self) -> Option<&str> {
        match self {
            RawRole::Name(name) => Some(name.as_str()),
            RawRole::Object(object) => object.first_defined(),
            RawRole::Other(_) => None,
        }
    }
}

/// User payload as the backend emits it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default, alias = "_id", alias = "userId")]
    pub id: Option<Value>,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<RawRole>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default, alias = "isEmailVerified", alias = "isVerified")]
    pub email_verified: Option<bool>,
    #[serde(default, alias = "phoneNumber")]
    pub phone: Option<String>,
}

impl RawUser {
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone().unwrap_or_default()
        } else {
            parts.join(" ")
        }
    }

    /// Collapse the wire shape into the canonical user.
    ///
    /// Only a missing id is fatal; every other field has a sane default.
    pub fn into_canonical(self) -> Result<CanonicalUser, String> {
        let id = self
            .id
            .as_ref()
            .and_then(scalar_to_string)
            .ok_or_else(|| "user payload has no usable 'id'".to_string())?;
        let name = self.display_name();
        let role = self
            .role
            .as_ref()
            .and_then(RawRole::resolve)
            .unwrap_or(DEFAULT_ROLE)
            .to_string();
        let status = match self.status {
            Some(raw) => StatusField::from_value(raw)?.name().to_string(),
            None => "Active".to_string(),
        };

        Ok(CanonicalUser {
            id,
            name,
            email: self.email.unwrap_or_default(),
            role,
            status,
            email_verified: self.email_verified.unwrap_or(false),
            phone: self.phone,
        })
    }
}

/// The one user shape downstream code sees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalUser {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CanonicalUser {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Closed set of roles the application knows how to serve
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    RestaurantOwner,
    RestaurantStaff,
    Driver,
    Customer,
    /// A role string this client does not recognize, kept verbatim
    Other(String),
}

impl Role {
    /// Parse a bare role string; matching ignores case, spaces, `_` and `-`
    pub fn parse(value: &str) -> Role {
        let key: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "admin" | "administrator" | "superadmin" => Role::Admin,
            "restaurantowner" | "owner" => Role::RestaurantOwner,
            "restaurantstaff" | "staff" | "kitchenstaff" | "chef" | "waiter" => {
                Role::RestaurantStaff
            }
            "driver" | "deliverydriver" | "rider" => Role::Driver,
            "customer" | "user" => Role::Customer,
            _ => Role::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::RestaurantOwner => "RestaurantOwner",
            Role::RestaurantStaff => "RestaurantStaff",
            Role::Driver => "Driver",
            Role::Customer => DEFAULT_ROLE,
            Role::Other(value) => value.as_str(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
