use serde::{Deserialize, Serialize};

use crate::model::{CanonicalUser, Role, DEFAULT_ROLE};

/// Client state that survives a reload: the access token and a user profile snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CanonicalUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl SessionSnapshot {
    pub fn new(token: Option<String>, user: Option<CanonicalUser>) -> Self {
        Self {
            token,
            user,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn role_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.role.as_str())
            .unwrap_or(DEFAULT_ROLE)
    }

    pub fn role(&self) -> Role {
        Role::parse(self.role_name())
    }
}
