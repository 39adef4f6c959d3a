//! # Lead Panel host
//!
//! Serves the compiled dashboard and injects the backend settings it needs at
//! runtime, so one frontend build can point at any Supabase project.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ env / .env  │────▶│  leadpanel-server │────▶│ /env.js + dist/ │
//! └─────────────┘     └──────────────────┘     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Host error types
//! - [`config`] - Environment settings
//! - [`observability`] - Log subscriber
//! - [`api`] - HTTP routes and the `env.js` renderer

pub mod error;
pub mod config;
pub mod observability;
pub mod api;

pub use error::{ServerError, ServerResult};
pub use api::{build_router, env_script, start_server, validate_dist, HostState, ServeOptions};
