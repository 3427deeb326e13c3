//! Profile model representing the authenticated user's identity record.

use serde::{Deserialize, Serialize};

/// The caller's identity record as returned by the identity API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Profile {
    /// Unique identifier for the user
    pub id: String,

    /// Name shown to other users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Registered email address, verified or not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub email_verified: bool,

    /// Registered phone number, verified or not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    pub phone_verified: bool,

    /// Account creation timestamp (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Profile {
    /// Create a profile with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether both the email address and the phone number are verified.
    pub fn is_fully_verified(&self) -> bool {
        self.email.is_some()
            && self.email_verified
            && self.phone_number.is_some()
            && self.phone_verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialize_partial() {
        let json = r#"{"id": "user-1", "email": "a@example.com"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "user-1");
        assert_eq!(profile.email.as_deref(), Some("a@example.com"));
        assert!(!profile.email_verified);
        assert!(profile.phone_number.is_none());
    }

    #[test]
    fn test_profile_skips_empty_optionals() {
        let json = serde_json::to_value(Profile::new("user-1")).unwrap();
        assert!(json.get("display_name").is_none());
        assert_eq!(json["phone_verified"], false);
    }

    #[test]
    fn test_is_fully_verified() {
        let mut profile = Profile::new("user-1");
        assert!(!profile.is_fully_verified());

        profile.email = Some("a@example.com".to_string());
        profile.email_verified = true;
        assert!(!profile.is_fully_verified());

        profile.phone_number = Some("+14155551234".to_string());
        profile.phone_verified = true;
        assert!(profile.is_fully_verified());
    }
}
