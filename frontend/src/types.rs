//! Wire types of the hosted auth and data APIs.
//!
//! # Categories
//!
//! - **Auth Types** - Token endpoint responses
//! - **Error Types** - Error bodies returned by auth and data endpoints

use leadpanel::{Session, User};
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth Types
// =============================================================================

/// Response of `POST /auth/v1/token` (password and refresh grants).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry as unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

impl TokenResponse {
    /// Build a session, deriving `expires_at` from `expires_in` when the
    /// server only sent the lifetime.
    pub fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Error body of the auth (`error_description`, `msg`) and data (`message`)
/// endpoints. All fields are optional since each endpoint uses a subset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Most specific message available, falling back to the raw body.
    pub fn describe(raw: &str) -> String {
        let body: ApiErrorBody = serde_json::from_str(raw).unwrap_or_default();
        body.error_description
            .or(body.msg)
            .or(body.message)
            .or(body.error)
            .unwrap_or_else(|| {
                if raw.trim().is_empty() {
                    "empty response".to_string()
                } else {
                    raw.trim().to_string()
                }
            })
    }
}
