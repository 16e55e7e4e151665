use crate::model::transaction::require_name;
use crate::Result;
use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}

serde_plain::derive_display_from_serialize!(Role);
serde_plain::derive_fromstr_from_deserialize!(Role);

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A dashboard account. The password is never part of this type, it only travels in forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// The body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// The body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        ensure!(!self.username.trim().is_empty(), "Username is required");
        validate_password(&self.password)
    }
}

/// The body of `PUT /users/:id`. Only the fields that are set are sent.
#[derive(Debug, Default, Clone, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.role.is_none()
        {
            bail!("Nothing to update");
        }
        if let Some(name) = &self.name {
            require_name(name)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

/// Rejects passwords shorter than 8 characters or missing any of: an uppercase letter, a lowercase
/// letter, a digit, a symbol.
pub fn validate_password(password: &str) -> Result<()> {
    let mut missing = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        missing.push("at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        missing.push("an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        missing.push("a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit");
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        missing.push("a symbol");
    }
    if !missing.is_empty() {
        bail!("Password needs {}", missing.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_accepted() {
        assert!(validate_password("Abcdef1!").is_ok());
        assert!(validate_password("Rumah$akit2024").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let err = validate_password("Ab1!").unwrap_err().to_string();
        assert!(err.contains("at least 8 characters"));
    }

    #[test]
    fn test_password_missing_classes() {
        assert!(validate_password("abcdef1!").is_err());
        assert!(validate_password("ABCDEF1!").is_err());
        assert!(validate_password("Abcdefg!").is_err());
        assert!(validate_password("Abcdefg1").is_err());
        let err = validate_password("abcdefgh").unwrap_err().to_string();
        assert!(err.contains("an uppercase letter"));
        assert!(err.contains("a digit"));
        assert!(err.contains("a symbol"));
        assert!(!err.contains("lowercase"));
    }

    #[test]
    fn test_user_without_role_defaults_to_user() {
        let json = r#"{"id": 2, "name": "Sari", "username": "sari"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.role.is_admin());
    }

    #[test]
    fn test_user_update_sends_only_set_fields() {
        let update = UserUpdate {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"role": "admin"}));
        assert!(UserUpdate::default().validate().is_err());
    }

    #[test]
    fn test_register_form_validates_password() {
        let form = RegisterForm {
            name: "Budi".to_string(),
            username: "budi".to_string(),
            password: "password".to_string(),
            role: Role::User,
        };
        assert!(form.validate().is_err());
    }
}
