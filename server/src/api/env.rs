//! The `env.js` script that hands backend settings to the browser.
//!
//! The page loads `/env.js` before the WebAssembly bundle; the frontend then
//! reads `window.SUPABASE_URL` and `window.SUPABASE_ANON_KEY`. A missing
//! setting is written as an empty string, which the frontend treats as absent.

use leadpanel::config::{SUPABASE_ANON_KEY, SUPABASE_URL};
use leadpanel::SupabaseConfig;

use crate::error::ServerResult;

/// Render the configuration script. Values are JSON string literals.
pub fn env_script(config: &SupabaseConfig) -> ServerResult<String> {
    let url = serde_json::to_string(config.url.as_deref().unwrap_or_default())?;
    let key = serde_json::to_string(config.anon_key.as_deref().unwrap_or_default())?;
    Ok(format!(
        "window.{SUPABASE_URL} = {url};\nwindow.{SUPABASE_ANON_KEY} = {key};\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_assigns_both_globals() {
        let config = SupabaseConfig::new(
            Some("https://demo.supabase.co".into()),
            Some("anon-key".into()),
        );
        let script = env_script(&config).unwrap();
        assert_eq!(
            script,
            "window.SUPABASE_URL = \"https://demo.supabase.co\";\nwindow.SUPABASE_ANON_KEY = \"anon-key\";\n"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let config = SupabaseConfig::new(Some("https://x.co".into()), Some("a\"b\\c\nd".into()));
        let script = env_script(&config).unwrap();
        assert!(script.contains(r#"window.SUPABASE_ANON_KEY = "a\"b\\c\nd";"#));
        assert_eq!(script.lines().count(), 2);
    }

    #[test]
    fn test_missing_values_become_empty_strings() {
        let script = env_script(&SupabaseConfig::default()).unwrap();
        assert!(script.contains("window.SUPABASE_URL = \"\";"));
        assert!(script.contains("window.SUPABASE_ANON_KEY = \"\";"));
    }
}
