pub mod login;
pub mod signin;

use serde::Deserialize;
use utoipa::ToSchema;

const MAX_USERNAME_LEN: usize = 50;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

impl CredentialsRequest {
    /// Login name with surrounding whitespace removed, if it is usable.
    pub fn normalized_username(&self) -> Option<&str> {
        let name = self.username.trim();
        let len = name.chars().count();
        (len > 0 && len <= MAX_USERNAME_LEN).then_some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str) -> CredentialsRequest {
        CredentialsRequest {
            username: username.to_string(),
            password: "x".to_string(),
        }
    }

    #[test]
    fn test_username_trimmed() {
        assert_eq!(credentials("  ana ").normalized_username(), Some("ana"));
    }

    #[test]
    fn test_blank_or_long_username_rejected() {
        assert_eq!(credentials("   ").normalized_username(), None);
        assert_eq!(credentials(&"a".repeat(51)).normalized_username(), None);
        assert!(credentials(&"ñ".repeat(50)).normalized_username().is_some());
    }

    #[test]
    fn test_wire_field_names() {
        let req: CredentialsRequest =
            serde_json::from_str(r#"{"usuario":"ana","contrasena":"pw"}"#).unwrap();
        assert_eq!(req.username, "ana");
        assert_eq!(req.password, "pw");
    }
}
