//! HTTP API module.
//!
//! Serves the dashboard bundle and its runtime configuration.

pub mod env;
pub mod server;

pub use env::env_script;
pub use server::{build_router, start_server, validate_dist, HostState, ServeOptions};
