//! # Lead Panel - lead triage for landing pages
//!
//! Platform-independent logic of the Lead Panel dashboard. The browser
//! frontend plugs in an HTTP backend and a Leptos-backed screen; tests plug
//! in [`MemoryBackend`] and [`RecordingScreen`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────────────┐     ┌─────────────┐
//! │   Backend   │◀────│        Dashboard         │────▶│   Screen    │
//! │ auth + rows │     │ gate · landings · leads  │     │  AppState   │
//! │ (RLS-scoped)│────▶│ status · csv export      │     │ alert · csv │
//! └─────────────┘     └──────────────────────────┘     └─────────────┘
//!        │ AuthEvent                ▲
//!        └──────────────────────────┘ run_auth_events
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Backend error type
//! - [`config`] - Endpoint/key resolution and row caps
//! - [`models`] - Landing, Lead, LeadStatus, Session
//! - [`format`] - Timestamp and CSV formatting
//! - [`backend`] - Backend trait, queries, auth channel, in-memory backend
//! - [`dashboard`] - Application state and all operations

// Core modules
pub mod error;
pub mod config;
pub mod models;

// Formatting
pub mod format;

// Backend abstraction
pub mod backend;

// Operations
pub mod dashboard;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{BackendError, BackendResult};

pub use config::{SupabaseConfig, EXPORT_LIMIT, LEAD_PAGE_LIMIT};

pub use models::{ExportRecord, Landing, Lead, LeadStatus, RowId, Session, User};

pub use format::{csv_line, escape_csv_field, format_timestamp, format_timestamp_in};

pub use backend::{
    decode_rows,
    memory::{Fault, MemoryBackend},
    AuthChannel, AuthEvent, AuthEvents, Backend, Filter, Order, Select, Update,
};

pub use dashboard::{
    build_csv, messages, AppState, AuthView, Dashboard, ExportFile, LandingOption, LeadRow,
    RecordingScreen, Screen, EXPORT_FILE_NAME, EXPORT_MIME,
};
