//! Signed-in admin profile types.

use serde::{Deserialize, Serialize};
use terracotta_core::Email;

/// The profile of the signed-in administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Account ID.
    #[serde(rename = "userID")]
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Server-assigned role label (e.g., "admin").
    pub role: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let profile: AdminProfile = serde_json::from_str(
            r#"{
                "userID": "U001",
                "name": "Priya Nair",
                "email": "priya@terracotta.example",
                "role": "admin"
            }"#,
        )
        .unwrap();
        assert_eq!(profile.user_id, "U001");
        assert_eq!(profile.email.to_string(), "priya@terracotta.example");
        assert_eq!(profile.role, "admin");
    }
}
