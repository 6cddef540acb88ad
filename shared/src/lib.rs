use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =========================================================
// Constants
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// Domain Models
// =========================================================

/// Sort direction for collection queries.
///
/// Serializes to the wire values the list endpoint expects
/// (`sortOrder=asc|desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Asc
    }
}

impl SortDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The opposite direction, used when a sorted column is clicked again.
    pub const fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A managed user account as the API returns it.
///
/// Identity is server-owned: `id` is never generated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Role key, one of the keys returned by `GET /roles`.
    pub role: String,
    pub active: bool,
    #[serde(default)]
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

/// One page of the users collection.
///
/// The list endpoint returns the page rows together with the pagination
/// totals; the client replaces its copy wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<User>,
    pub total_pages: u32,
    pub total_users: u64,
}

/// Role key to display label mapping from `GET /roles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolesResponse {
    pub roles: BTreeMap<String, String>,
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// `resetUrl` is the page the reset email should link back to; the client
/// builds it from its own origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub reset_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub token: String,
}

// =========================================================
// User Management
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

/// Admin-side password override, `PATCH /users/{id}/password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

// =========================================================
// Profile
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// =========================================================
// Error Envelope
// =========================================================

/// The error body every endpoint agrees on: `{ "errors": { "message": … } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: ErrorMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: ErrorMessage {
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_camel_case_on_the_wire() {
        let json = r#"{
            "id": 7,
            "name": "Ada",
            "email": "ada@example.com",
            "role": "admin",
            "active": true,
            "lastLogin": "2024-05-01T12:30:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, "admin");
        assert!(user.last_login.is_some());

        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("lastLogin").is_some());
        assert!(out.get("last_login").is_none());
    }

    #[test]
    fn user_without_last_login_decodes_to_none() {
        let json = r#"{"id":1,"name":"B","email":"b@x.io","role":"user","active":false}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.last_login, None);
    }

    #[test]
    fn page_totals_decode() {
        let json = r#"{"users":[],"totalPages":4,"totalUsers":38}"#;
        let page: UserPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.total_users, 38);
    }

    #[test]
    fn sort_direction_wire_values() {
        assert_eq!(SortDirection::Asc.as_str(), "asc");
        assert_eq!(SortDirection::Desc.as_str(), "desc");
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }

    #[test]
    fn error_envelope_decodes_server_shape() {
        let json = r#"{"errors":{"message":"Email already in use"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.errors.message, "Email already in use");
    }

    #[test]
    fn change_password_request_camel_case() {
        let req = ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "new-secret".into(),
        };
        let out = serde_json::to_value(&req).unwrap();
        assert_eq!(out["currentPassword"], "old");
        assert_eq!(out["newPassword"], "new-secret");
    }
}
