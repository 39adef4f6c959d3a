//! Runtime configuration for the host.
//!
//! The two backend settings come from the process environment, optionally
//! seeded from a `.env` file. They are handed to the browser unchanged
//! through `/env.js`.

use leadpanel::config::{SUPABASE_ANON_KEY, SUPABASE_URL};
use leadpanel::SupabaseConfig;

/// Load `.env` (if present) and read the backend settings.
pub fn load() -> SupabaseConfig {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }
    from_lookup(|key| std::env::var(key).ok())
}

/// Build the settings from any key lookup. Missing keys are logged, not fatal.
pub fn from_lookup<F>(lookup: F) -> SupabaseConfig
where
    F: Fn(&str) -> Option<String>,
{
    let config = SupabaseConfig::new(lookup(SUPABASE_URL), lookup(SUPABASE_ANON_KEY));
    let missing = config.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(
            missing = %missing.join(", "),
            "Backend settings incomplete; the dashboard will report it as not configured"
        );
    }
    config
}
