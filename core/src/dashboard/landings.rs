//! Landing loader and landing selection.

use super::{messages, Dashboard, LandingOption, Screen};
use crate::backend::{decode_rows, Backend, Select};
use crate::error::BackendResult;
use crate::models::{Landing, RowId};

const LANDING_COLUMNS: [&str; 5] = ["id", "name", "public_path", "active", "created_at"];

impl<B: Backend, S: Screen> Dashboard<B, S> {
    async fn fetch_landings(&self) -> BackendResult<Vec<Landing>> {
        let query = Select::table("landings")
            .columns(&LANDING_COLUMNS)
            .order("created_at", false);
        decode_rows(self.backend.select(&query).await?)
    }

    /// Refill the landing selector, newest first.
    ///
    /// The selection moves to the first landing. On failure the selector is
    /// left exactly as it was.
    pub async fn load_landings(&self) {
        let landings = match self.fetch_landings().await {
            Ok(landings) => landings,
            Err(e) => {
                log::error!("❌ Failed to load landings: {}", e);
                self.screen
                    .update(|s| s.info = messages::LANDINGS_FAILED.to_string());
                return;
            }
        };

        log::debug!("loaded {} landings", landings.len());
        let options: Vec<LandingOption> = landings.iter().map(LandingOption::from).collect();
        self.screen.update(|s| {
            s.selected_landing = options.first().map(|o| o.id.clone());
            s.landings = options;
            if s.landings.is_empty() {
                s.info = messages::NO_LANDINGS.to_string();
            }
        });
    }

    /// Change the selected landing and reload its leads.
    pub async fn select_landing(&self, landing: Option<RowId>) {
        self.screen.update(|s| s.selected_landing = landing);
        self.load_leads().await;
    }

    /// Reload landings, then leads.
    pub async fn refresh(&self) {
        self.load_landings().await;
        self.load_leads().await;
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::memory::{Fault, MemoryBackend};
    use crate::dashboard::{messages, Dashboard, RecordingScreen};
    use crate::models::RowId;
    use futures::executor::block_on;
    use serde_json::json;

    fn signed_in() -> Dashboard<MemoryBackend, RecordingScreen> {
        let backend = MemoryBackend::new();
        backend.add_account("ola@example.com", "secret", "u1");
        block_on(backend_sign_in(&backend));
        Dashboard::new(backend, RecordingScreen::new())
    }

    async fn backend_sign_in(backend: &MemoryBackend) {
        use crate::backend::Backend;
        backend
            .sign_in_with_password("ola@example.com", "secret")
            .await
            .unwrap();
    }

    #[test]
    fn test_labels_and_order() {
        let dash = signed_in();
        let backend = dash.backend();
        backend.insert("landings", json!({"id": "a", "owner_id": "u1", "name": "Old", "public_path": "/old", "active": false, "created_at": "2024-01-01T00:00:00Z"}));
        backend.insert("landings", json!({"id": "b", "owner_id": "u1", "name": null, "public_path": "/new", "active": true, "created_at": "2025-01-01T00:00:00Z"}));
        backend.insert("landings", json!({"id": "c", "owner_id": "u2", "public_path": "/foreign", "active": true, "created_at": "2026-01-01T00:00:00Z"}));

        block_on(dash.load_landings());
        let state = dash.screen().state();
        let labels: Vec<&str> = state.landings.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["/new", "Old (/old) [OFF]"]);
        assert_eq!(state.selected_landing, Some(RowId::new("b")));
    }

    #[test]
    fn test_empty_result() {
        let dash = signed_in();
        block_on(dash.load_landings());
        let state = dash.screen().state();
        assert!(state.landings.is_empty());
        assert_eq!(state.selected_landing, None);
        assert_eq!(state.info, messages::NO_LANDINGS);
    }

    #[test]
    fn test_failure_keeps_selector() {
        let dash = signed_in();
        dash.backend().insert("landings", json!({"id": 1, "owner_id": "u1", "public_path": "/a", "active": true, "created_at": "2025-01-01"}));
        dash.backend().insert("landings", json!({"id": 2, "owner_id": "u1", "public_path": "/b", "active": true, "created_at": "2025-01-02"}));
        block_on(dash.load_landings());
        block_on(dash.select_landing(Some(RowId::new("1"))));

        dash.backend().fail(Fault::Select("landings".into()));
        block_on(dash.load_landings());

        let state = dash.screen().state();
        assert_eq!(state.landings.len(), 2);
        assert_eq!(state.selected_landing, Some(RowId::new("1")));
        assert_eq!(state.info, messages::LANDINGS_FAILED);
    }

    #[test]
    fn test_refresh_resets_selection_to_newest() {
        let dash = signed_in();
        dash.backend().insert("landings", json!({"id": 1, "owner_id": "u1", "public_path": "/a", "active": true, "created_at": "2025-01-01"}));
        dash.backend().insert("landings", json!({"id": 2, "owner_id": "u1", "public_path": "/b", "active": true, "created_at": "2025-01-02"}));
        block_on(dash.refresh());
        block_on(dash.select_landing(Some(RowId::new("1"))));
        block_on(dash.refresh());
        assert_eq!(dash.screen().state().selected_landing, Some(RowId::new("2")));
    }
}
