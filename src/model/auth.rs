use serde::{Deserialize, Serialize};

use crate::model::CanonicalUser;

/// Canonical auth response.
///
/// `access_token` and `token` always carry the same value; older call sites
/// read `token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CanonicalUser>,
}

impl AuthSession {
    pub fn new(access_token: String, refresh_token: Option<String>, user: Option<CanonicalUser>) -> Self {
        Self {
            token: access_token.clone(),
            access_token,
            refresh_token,
            user,
        }
    }
}
