//! Browser services.
//!
//! # Services
//!
//! - [`supabase`] - Auth and data API client (implements `leadpanel::Backend`)
//! - [`browser`] - Signal-backed screen with alerts and downloads (implements `leadpanel::Screen`)

pub mod supabase;
pub mod browser;

pub use supabase::*;
pub use browser::*;
