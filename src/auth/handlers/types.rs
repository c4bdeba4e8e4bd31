/**
 * Authentication Handler Types
 *
 * Request and response types for the auth endpoints, plus the input
 * validation that runs at the handler boundary before any service is
 * touched. Validation mirrors the signup rules the API has always had:
 * name 2-255 characters, a well-formed email, password 6-128
 * characters, and an optional role restricted to the known set.
 */

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, FieldError};
use crate::users::model::{NewUser, PublicUser, Role};

/// Sign-up request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to "user" when absent
    #[serde(default)]
    pub role: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Response body for sign-up and sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Minimal structural check for an email address: one `@`, a non-empty
/// local part, and a dotted, non-empty domain. Anything stricter is the
/// edge layer's business.
pub(crate) fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}

pub(crate) fn validate_name(name: &str) -> Option<FieldError> {
    let trimmed = name.trim();
    if trimmed.len() < 2 || trimmed.len() > 255 {
        return Some(FieldError::new(
            "name",
            "Name must be between 2 and 255 characters",
        ));
    }
    None
}

pub(crate) fn validate_email(email: &str) -> Option<FieldError> {
    if !is_well_formed_email(email) {
        return Some(FieldError::new("email", "Email address is not valid"));
    }
    None
}

pub(crate) fn validate_password(password: &str) -> Option<FieldError> {
    if password.len() < 6 || password.len() > 128 {
        return Some(FieldError::new(
            "password",
            "Password must be between 6 and 128 characters",
        ));
    }
    None
}

pub(crate) fn validate_role(role: &str) -> Result<Role, FieldError> {
    Role::parse(role).ok_or_else(|| {
        FieldError::new("role", "Role must be either \"user\" or \"admin\"")
    })
}

impl SignupRequest {
    /// Validate every field, collecting all failures so the client sees
    /// the complete list at once.
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let mut details = Vec::new();

        if let Some(err) = validate_name(&self.name) {
            details.push(err);
        }
        if let Some(err) = validate_email(&self.email) {
            details.push(err);
        }
        if let Some(err) = validate_password(&self.password) {
            details.push(err);
        }
        let role = match self.role.as_deref() {
            None => Role::User,
            Some(raw) => match validate_role(raw) {
                Ok(role) => role,
                Err(err) => {
                    details.push(err);
                    Role::User
                }
            },
        };

        if !details.is_empty() {
            return Err(ApiError::validation(details));
        }

        Ok(NewUser {
            name: self.name.trim().to_string(),
            email: self.email,
            password: self.password,
            role,
        })
    }
}

impl SigninRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut details = Vec::new();

        if let Some(err) = validate_email(&self.email) {
            details.push(err);
        }
        if self.password.is_empty() {
            details.push(FieldError::new("password", "Password is required"));
        }

        if !details.is_empty() {
            return Err(ApiError::validation(details));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> SignupRequest {
        SignupRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            password: "pw12345".to_string(),
            role: None,
        }
    }

    #[test]
    fn well_formed_emails() {
        assert!(is_well_formed_email("ann@example.com"));
        assert!(is_well_formed_email("a.b+c@sub.example.co"));
        assert!(!is_well_formed_email("annexample.com"));
        assert!(!is_well_formed_email("@example.com"));
        assert!(!is_well_formed_email("ann@"));
        assert!(!is_well_formed_email("ann@example"));
        assert!(!is_well_formed_email("ann@exa mple.com"));
        assert!(!is_well_formed_email("ann@example..com"));
    }

    #[test]
    fn valid_signup_defaults_role_to_user() {
        let new_user = request().validate().unwrap();
        assert_eq!(new_user.role, Role::User);
        assert_eq!(new_user.name, "Ann");
    }

    #[test]
    fn explicit_admin_role_is_accepted() {
        let mut req = request();
        req.role = Some("admin".to_string());
        assert_eq!(req.validate().unwrap().role, Role::Admin);
    }

    #[test]
    fn all_failures_are_reported_together() {
        let req = SignupRequest {
            name: "A".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
            role: Some("root".to_string()),
        };
        let err = req.validate().unwrap_err();
        match err {
            ApiError::Validation { details } => {
                let fields: Vec<_> = details.iter().map(|d| d.field).collect();
                assert_eq!(fields, vec!["name", "email", "password", "role"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        let mut req = request();
        req.name = "  Ann  ".to_string();
        assert_eq!(req.validate().unwrap().name, "Ann");
    }

    #[test]
    fn signin_requires_a_password() {
        let req = SigninRequest {
            email: "ann@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn signin_accepts_valid_input() {
        let req = SigninRequest {
            email: "ann@example.com".to_string(),
            password: "pw12345".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
