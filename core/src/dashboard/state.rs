//! Application state shared by every dashboard operation.

use crate::format::format_timestamp;
use crate::models::{Landing, Lead, LeadStatus, RowId};

/// What the header and the two cards show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthView {
    /// Only the login card is visible
    #[default]
    SignedOut,
    /// Identity label, logout button and the app card are visible
    SignedIn { identity: String },
}

/// One entry of the landing selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingOption {
    pub id: RowId,
    pub label: String,
}

impl From<&Landing> for LandingOption {
    fn from(landing: &Landing) -> Self {
        Self {
            id: landing.id.clone(),
            label: landing.label(),
        }
    }
}

/// One rendered row of the lead table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRow {
    pub id: RowId,
    /// Local, human-formatted creation time
    pub created_at: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Status as loaded from the backend (`new` when empty)
    pub status_text: String,
    /// Value shown by the row's status selector
    pub selected: LeadStatus,
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        Self {
            id: lead.id.clone(),
            created_at: lead
                .created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            name: lead.name.clone().unwrap_or_default(),
            email: lead.email.clone().unwrap_or_default(),
            phone: lead.phone.clone().unwrap_or_default(),
            status_text: lead.status_text().to_string(),
            selected: lead.status(),
        }
    }
}

/// Transient UI state. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub auth: AuthView,
    /// Message under the login form
    pub login_message: String,
    pub landings: Vec<LandingOption>,
    pub selected_landing: Option<RowId>,
    /// `None` shows every status
    pub status_filter: Option<LeadStatus>,
    pub rows: Vec<LeadRow>,
    /// Bumped whenever `rows` is replaced; rows are keyed by (generation, id)
    pub generation: u64,
    /// Info line above the table
    pub info: String,
}

impl AppState {
    pub fn login_visible(&self) -> bool {
        matches!(self.auth, AuthView::SignedOut)
    }

    /// Whether the app card, identity label and logout button are shown.
    pub fn app_visible(&self) -> bool {
        !self.login_visible()
    }

    pub fn identity(&self) -> Option<&str> {
        match &self.auth {
            AuthView::SignedIn { identity } => Some(identity),
            AuthView::SignedOut => None,
        }
    }

    pub fn row(&self, id: &RowId) -> Option<&LeadRow> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn row_mut(&mut self, id: &RowId) -> Option<&mut LeadRow> {
        self.rows.iter_mut().find(|r| &r.id == id)
    }

    /// Replace all rows, discarding the previous render.
    pub fn replace_rows(&mut self, rows: Vec<LeadRow>) {
        self.rows = rows;
        self.generation += 1;
    }

    pub fn clear_rows(&mut self) {
        self.replace_rows(Vec::new());
    }
}
