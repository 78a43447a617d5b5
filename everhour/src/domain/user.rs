use serde::{Deserialize, Serialize};

/// The account whose credential authorizes all requests. Immutable once
/// fetched; cached for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
