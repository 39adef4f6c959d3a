//! The dashboard: every user-visible operation, written against a
//! [`Backend`] and a [`Screen`].
//!
//! ```text
//!  auth event ──┐
//!  startup ─────┴─▶ session_gate ──▶ load_landings ──▶ load_leads ◀── select_landing
//!                                                         ▲  ▲        set_status_filter
//!                       refresh ──▶ load_landings ────────┘  │
//!                       update_status ──(on failure)─────────┘
//!                       export_csv (same filters, own query)
//! ```
//!
//! # Modules
//!
//! - [`state`] - [`AppState`] and its row/option types
//! - [`messages`] - Fixed user-facing texts
//! - `session` - Session gate, login, logout
//! - `landings` - Landing loader, selection, refresh
//! - `leads` - Lead loader, status filter, status updater
//! - `export` - CSV exporter

pub mod messages;
pub mod state;

mod export;
mod landings;
mod leads;
mod session;

use futures::StreamExt;
use std::cell::RefCell;

use crate::backend::{AuthEvents, Backend};

pub use export::{build_csv, ExportFile, EXPORT_FILE_NAME, EXPORT_MIME};
pub use state::{AppState, AuthView, LandingOption, LeadRow};

// =============================================================================
// Screen
// =============================================================================

/// Where the dashboard renders: state storage plus the two browser
/// interactions that are not state (blocking alerts and file downloads).
pub trait Screen {
    /// Read the current state.
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R;

    /// Mutate the state; the view re-renders from it.
    fn update(&self, f: impl FnOnce(&mut AppState));

    /// Show a blocking alert.
    fn alert(&self, message: &str);

    /// Offer a file to the user.
    fn download(&self, file: ExportFile);
}

/// [`Screen`] that keeps state in a `RefCell` and records alerts and
/// downloads. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingScreen {
    state: RefCell<AppState>,
    alerts: RefCell<Vec<String>>,
    downloads: RefCell<Vec<ExportFile>>,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn downloads(&self) -> Vec<ExportFile> {
        self.downloads.borrow().clone()
    }
}

impl Screen for RecordingScreen {
    fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut AppState)) {
        f(&mut self.state.borrow_mut())
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn download(&self, file: ExportFile) {
        self.downloads.borrow_mut().push(file);
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// The lead dashboard.
///
/// All operations recover from backend errors themselves: they log the
/// detail and leave a fixed message on the screen. None of them return an
/// error.
pub struct Dashboard<B, S> {
    backend: B,
    screen: S,
}

impl<B: Backend, S: Screen> Dashboard<B, S> {
    pub fn new(backend: B, screen: S) -> Self {
        Self { backend, screen }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Re-run the session gate for every auth event until the channel closes.
    pub async fn run_auth_events(&self, mut events: AuthEvents) {
        while let Some(event) = events.next().await {
            log::info!("🔑 Auth state changed: {:?}", event);
            self.session_gate().await;
        }
        log::debug!("auth event stream closed");
    }
}
