use serde::{Deserialize, Serialize};
use warp::http::StatusCode;

pub const MSG_REQUIRED: &str = "Username and password are required";
pub const MSG_INVALID: &str = "Invalid username or password";
pub const MSG_SERVER: &str = "Server error";
pub const MSG_BAD_BODY: &str = "Invalid request body";

/// Body of `POST /login`. Both fields are optional here so that a missing
/// field reaches `validate` rather than failing to decode.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// A request that passed `validate`.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Outcome of one login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    ValidationFailed,
    UserNotFound,
    PasswordMismatch,
    Success { user_id: i64, role: String },
    StoreError,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoginResponse {
    Fail {
        message: &'static str,
    },
    Success {
        #[serde(rename = "userId")]
        user_id: i64,
        role: String,
    },
}

impl LoginRequest {
    /// Both fields present and non-empty. No trimming or case folding.
    pub fn validate(self) -> Result<Credentials, LoginResult> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(LoginResult::ValidationFailed),
        }
    }
}

impl LoginResponse {
    pub fn fail(message: &'static str) -> Self {
        Self::Fail { message }
    }
}

impl LoginResult {
    /// Status code and body sent to the client.
    ///
    /// `UserNotFound` and `PasswordMismatch` are indistinguishable here, and
    /// both are a 200.
    pub fn reply(self) -> (StatusCode, LoginResponse) {
        match self {
            Self::ValidationFailed => (StatusCode::BAD_REQUEST, LoginResponse::fail(MSG_REQUIRED)),
            Self::UserNotFound | Self::PasswordMismatch => {
                (StatusCode::OK, LoginResponse::fail(MSG_INVALID))
            }
            Self::Success { user_id, role } => {
                (StatusCode::OK, LoginResponse::Success { user_id, role })
            }
            Self::StoreError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                LoginResponse::fail(MSG_SERVER),
            ),
        }
    }
}
