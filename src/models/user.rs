use serde::{Deserialize, Serialize};

/// Identity record for the currently authenticated account.
///
/// The backend owns the shape of this document; unknown fields are ignored
/// on deserialization. The session store only ever replaces the whole
/// record, never individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    /// Name to address the user by: username, then email, then id.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}
