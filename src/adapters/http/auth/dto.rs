//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::user::User;

pub const SIGN_UP_SUCCESS: &str = "Sign up successfully!";
pub const SIGN_IN_SUCCESS: &str = "Login successfully!";

/// Missing fields deserialize as empty strings so they are reported as
/// field errors rather than rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Optional body for clients that cannot send cookies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    #[serde(alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// Account summary returned to the account owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
            username: user.username().as_str().to_string(),
            email: user.email().as_str().to_string(),
            image: user.image().map(|i| i.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub message: String,
    pub user: AccountResponse,
}

impl SessionResponse {
    pub fn new(message: &str, user: &User) -> Self {
        Self {
            message: message.to_string(),
            user: AccountResponse::from(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_up_request_accepts_camel_case_confirmation() {
        let json = r#"{"name":"Ada","email":"ada@example.com","password":"secret1","confirmPassword":"secret1"}"#;
        let req: SignUpRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.confirm_password, "secret1");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: SignInRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }
}
