use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User — Authenticated user as returned by login/registration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub token: String,
    #[serde(rename = "_id")]
    pub id: String,
}

// ---------------------------------------------------------------------------
// StoredUser — Minimal projection persisted next to the token
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            id: user.id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionRecord — Token plus projection held by an authenticated session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

impl From<User> for SessionRecord {
    fn from(user: User) -> Self {
        Self {
            token: user.token,
            user_id: user.id,
            username: user.username,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Wire body for registration: the form's password is echoed as
/// `confirm_password`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistrationPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(rename = "confirm_password")]
    pub confirm_password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'a str>,
}

impl<'a> From<&'a RegistrationRequest> for RegistrationPayload<'a> {
    fn from(req: &'a RegistrationRequest) -> Self {
        Self {
            username: &req.username,
            password: &req.password,
            confirm_password: &req.password,
            email: req.email.as_deref(),
            first_name: req.first_name.as_deref(),
            last_name: req.last_name.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// ApiErrorBody — Error payload of non-2xx responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub error: Option<String>,
}
