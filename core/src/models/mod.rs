//! Domain models for the Lead Panel dashboard.
//!
//! - [`Landing`] - A marketing page owned by the signed-in account
//! - [`Lead`] - A form submission captured by a landing page
//! - [`LeadStatus`] - Triage status of a lead (`new`, `seen`, `contacted`)
//! - [`ExportRecord`] - The subset of lead columns written to CSV
//! - [`Session`] / [`User`] - The authenticated identity context
//!
//! Rows come from a PostgREST-style API, so text columns are decoded
//! leniently: `null`, numbers and booleans are all accepted.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Row Identifiers
// =============================================================================

/// Opaque primary key of a backend row.
///
/// Accepts both UUID strings and integer ids and keeps them as text, which
/// is all the dashboard needs for equality filters and row keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(RowId(s)),
            Value::Number(n) => Ok(RowId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, got {}",
                other
            ))),
        }
    }
}

/// Decode an optional text column, rendering scalars as text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Decode a required text column, treating `null` as empty.
fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Lead Status
// =============================================================================

/// Triage status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Not looked at yet (the default)
    #[default]
    New,
    /// Opened by the account holder
    Seen,
    /// The person behind the lead has been contacted
    Contacted,
}

impl LeadStatus {
    /// All statuses, in selector order.
    pub const ALL: [LeadStatus; 3] = [LeadStatus::New, LeadStatus::Seen, LeadStatus::Contacted];

    /// Wire and display value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Seen => "seen",
            LeadStatus::Contacted => "contacted",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the three statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lead status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "seen" => Ok(LeadStatus::Seen),
            "contacted" => Ok(LeadStatus::Contacted),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Landing
// =============================================================================

/// A landing page visible to the signed-in account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    pub id: RowId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub public_path: String,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
}

impl Landing {
    /// Selector label: `name (public_path)` or the bare path, with ` [OFF]`
    /// appended for inactive pages.
    pub fn label(&self) -> String {
        let base = match self.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("{} ({})", name, self.public_path),
            None => self.public_path.clone(),
        };
        if self.is_active() {
            base
        } else {
            format!("{} [OFF]", base)
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }
}

// =============================================================================
// Lead
// =============================================================================

/// A single form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: RowId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

impl Lead {
    /// Status text as shown in the table; empty or missing reads as `new`.
    pub fn status_text(&self) -> &str {
        match self.status.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => LeadStatus::New.as_str(),
        }
    }

    /// Status the row selector starts on. Unknown values fall back to `new`.
    pub fn status(&self) -> LeadStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Lead columns written to the CSV export, in header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

impl ExportRecord {
    /// Column names, also used as the `select` field list.
    pub const COLUMNS: [&'static str; 5] = ["created_at", "name", "email", "phone", "status"];

    /// Cell values in [`Self::COLUMNS`] order; absent values are empty.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.created_at.as_deref().unwrap_or(""),
            self.name.as_deref().unwrap_or(""),
            self.email.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or(""),
            self.status.as_deref().unwrap_or(""),
        ]
    }
}

// =============================================================================
// Session
// =============================================================================

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Email when known, otherwise the opaque user id.
    pub fn display_name(&self) -> &str {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => &self.id,
        }
    }
}

/// An authenticated session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    /// Whether the access token expires within `margin_secs` of `now`.
    pub fn expires_within(&self, now: i64, margin_secs: i64) -> bool {
        self.expires_at
            .map(|at| at - margin_secs <= now)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_landing_label() {
        let mut landing: Landing = serde_json::from_value(json!({
            "id": 7,
            "name": "Spring promo",
            "public_path": "/spring",
            "active": true,
            "created_at": "2025-03-01T10:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(landing.id.as_str(), "7");
        assert_eq!(landing.label(), "Spring promo (/spring)");

        landing.active = Some(false);
        assert_eq!(landing.label(), "Spring promo (/spring) [OFF]");

        landing.name = Some(String::new());
        assert_eq!(landing.label(), "/spring [OFF]");

        landing.active = None;
        landing.name = None;
        assert_eq!(landing.label(), "/spring [OFF]");
    }

    #[test]
    fn test_lead_status_defaults() {
        let lead: Lead = serde_json::from_value(json!({
            "id": "L1",
            "created_at": null,
            "name": "Anna",
            "status": null
        }))
        .unwrap();
        assert_eq!(lead.status_text(), "new");
        assert_eq!(lead.status(), LeadStatus::New);
        assert_eq!(lead.email, None);

        let odd = Lead {
            status: Some("archived".into()),
            ..lead.clone()
        };
        assert_eq!(odd.status_text(), "archived");
        assert_eq!(odd.status(), LeadStatus::New);

        let seen = Lead {
            status: Some("seen".into()),
            ..lead
        };
        assert_eq!(seen.status(), LeadStatus::Seen);
    }

    #[test]
    fn test_lenient_text_columns() {
        let record: ExportRecord = serde_json::from_value(json!({
            "created_at": "2025-01-01",
            "phone": 48123456789u64,
            "name": null
        }))
        .unwrap();
        assert_eq!(
            record.cells(),
            ["2025-01-01", "", "", "48123456789", ""]
        );
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("contacted".parse::<LeadStatus>(), Ok(LeadStatus::Contacted));
        assert!("Contacted".parse::<LeadStatus>().is_err());
        assert_eq!(serde_json::to_string(&LeadStatus::Seen).unwrap(), "\"seen\"");
    }

    #[test]
    fn test_user_display_name() {
        let user = User {
            id: "4f1c".into(),
            email: Some("owner@example.com".into()),
        };
        assert_eq!(user.display_name(), "owner@example.com");

        let anonymous = User {
            id: "4f1c".into(),
            email: Some(String::new()),
        };
        assert_eq!(anonymous.display_name(), "4f1c");
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            access_token: "t".into(),
            refresh_token: Some("r".into()),
            expires_at: Some(1_000),
            user: User { id: "u".into(), email: None },
        };
        assert!(!session.expires_within(900, 60));
        assert!(session.expires_within(940, 60));
        assert!(session.expires_within(2_000, 0));

        let open_ended = Session { expires_at: None, ..session };
        assert!(!open_ended.expires_within(i64::MAX, 60));
    }
}
