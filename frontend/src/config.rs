//! Application configuration.
//!
//! The endpoint URL and public key are taken from the build environment
//! (`SUPABASE_URL=... trunk build`) or, failing that, from `window` globals
//! injected by the host page (see `/env.js` served by `leadpanel-server`).

use leadpanel::config::{SUPABASE_ANON_KEY, SUPABASE_URL};
use leadpanel::SupabaseConfig;
use wasm_bindgen::JsValue;

/// Application name, used for the page title.
pub const APP_NAME: &str = "Lead Panel";

/// `localStorage` key holding the persisted session.
pub const SESSION_STORAGE_KEY: &str = "leadpanel.auth.session";

/// Refresh the access token when it expires within this many seconds.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// String global injected on `window`, if any.
fn injected_global(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_string())
}

/// Resolve the backend configuration, warning about anything missing.
///
/// Startup continues regardless; backend calls fail until it is fixed.
pub fn supabase_config() -> SupabaseConfig {
    let config = SupabaseConfig::new(
        SupabaseConfig::resolve([
            option_env!("SUPABASE_URL").map(String::from),
            injected_global(SUPABASE_URL),
        ]),
        SupabaseConfig::resolve([
            option_env!("SUPABASE_ANON_KEY").map(String::from),
            injected_global(SUPABASE_ANON_KEY),
        ]),
    );

    let missing = config.missing_keys();
    if !missing.is_empty() {
        log::warn!(
            "⚠️ Missing {}. Set them at build time or inject them via env.js.",
            missing.join(" / ")
        );
    }
    config
}
