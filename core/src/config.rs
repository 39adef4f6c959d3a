//! Backend configuration.
//!
//! The dashboard needs two values: the service endpoint URL and the public
//! (anon) API key. They are looked up from several sources in order; a
//! missing value is reported but never stops startup.

/// Name of the endpoint URL setting.
pub const SUPABASE_URL: &str = "SUPABASE_URL";

/// Name of the public API key setting.
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Lead rows rendered on screen per load.
pub const LEAD_PAGE_LIMIT: usize = 200;

/// Lead rows written to one CSV export.
pub const EXPORT_LIMIT: usize = 5000;

/// Resolved backend settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Service endpoint, without trailing slash
    pub url: Option<String>,
    /// Public API key sent as `apikey`
    pub anon_key: Option<String>,
}

impl SupabaseConfig {
    pub fn new(url: Option<String>, anon_key: Option<String>) -> Self {
        Self {
            url: url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            anon_key: anon_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
        }
    }

    /// First non-empty value among `sources`.
    pub fn resolve<I>(sources: I) -> Option<String>
    where
        I: IntoIterator<Item = Option<String>>,
    {
        sources
            .into_iter()
            .flatten()
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }

    /// Names of the settings that are still missing.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_none() {
            missing.push(SUPABASE_URL);
        }
        if self.anon_key.is_none() {
            missing.push(SUPABASE_ANON_KEY);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_keys().is_empty()
    }

    /// Data API URL for a collection, e.g. `{url}/rest/v1/leads`.
    pub fn rest_url(&self, collection: &str) -> Option<String> {
        self.url
            .as_ref()
            .map(|base| format!("{}/rest/v1/{}", base, collection))
    }

    /// Auth API URL for an endpoint, e.g. `{url}/auth/v1/token`.
    pub fn auth_url(&self, endpoint: &str) -> Option<String> {
        self.url
            .as_ref()
            .map(|base| format!("{}/auth/v1/{}", base, endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_order() {
        let value = SupabaseConfig::resolve([
            None,
            Some("  ".to_string()),
            Some("https://abc.supabase.co".to_string()),
            Some("https://other".to_string()),
        ]);
        assert_eq!(value.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(SupabaseConfig::resolve([None, None]), None);
    }

    #[test]
    fn test_urls() {
        let config = SupabaseConfig::new(
            Some("https://abc.supabase.co/".into()),
            Some("anon".into()),
        );
        assert!(config.is_complete());
        assert_eq!(
            config.rest_url("leads").as_deref(),
            Some("https://abc.supabase.co/rest/v1/leads")
        );
        assert_eq!(
            config.auth_url("token").as_deref(),
            Some("https://abc.supabase.co/auth/v1/token")
        );
    }

    #[test]
    fn test_missing_keys() {
        let config = SupabaseConfig::new(None, Some(String::new()));
        assert_eq!(config.missing_keys(), vec![SUPABASE_URL, SUPABASE_ANON_KEY]);
        assert_eq!(config.rest_url("leads"), None);
    }
}
