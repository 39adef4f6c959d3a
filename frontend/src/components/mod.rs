//! UI components of the Lead Panel dashboard.
//!
//! Every component reads the shared `AppState` signal through the
//! [`AppDashboard`](crate::AppDashboard) context and calls dashboard
//! operations from its event handlers.
//!
//! # Layout Components
//! - [`Header`] - App name, signed-in identity and logout button
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`LoginCard`] - Email/password form (signed out only)
//! - [`Toolbar`] - Landing selector, status filter, refresh, CSV export, info line
//! - [`LeadsTable`] - Lead rows with inline status selectors

mod header;
mod login;
mod toolbar;
mod leads_table;
mod footer;

pub use header::*;
pub use login::*;
pub use toolbar::*;
pub use leads_table::*;
pub use footer::*;
