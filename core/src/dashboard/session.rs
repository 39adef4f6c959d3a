//! Session gate, login and logout.

use super::{messages, AuthView, Dashboard, Screen};
use crate::backend::Backend;

impl<B: Backend, S: Screen> Dashboard<B, S> {
    /// Show the view matching the current session.
    ///
    /// Signed out: only the login card. Signed in: identity, logout and the
    /// app card, then landings and leads are (re)loaded in that order.
    /// Safe to call any number of times.
    pub async fn session_gate(&self) {
        let session = match self.backend.get_session().await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Could not read session, treating as signed out: {}", e);
                None
            }
        };

        let Some(session) = session else {
            self.screen.update(|s| s.auth = AuthView::SignedOut);
            return;
        };

        let identity = session.user.display_name().to_string();
        self.screen.update(|s| s.auth = AuthView::SignedIn { identity });

        self.load_landings().await;
        self.load_leads().await;
    }

    /// Sign in with the login form values.
    pub async fn login(&self, email: &str, password: &str) {
        self.screen.update(|s| s.login_message.clear());
        let email = email.trim();

        match self.backend.sign_in_with_password(email, password).await {
            Ok(session) => {
                log::info!("✅ Signed in as {}", session.user.display_name());
                self.session_gate().await;
            }
            Err(e) => {
                log::error!("❌ Sign-in failed: {}", e);
                self.screen
                    .update(|s| s.login_message = messages::LOGIN_FAILED.to_string());
            }
        }
    }

    /// Sign out, then show whatever the session gate decides.
    pub async fn logout(&self) {
        if let Err(e) = self.backend.sign_out().await {
            log::error!("❌ Sign-out failed: {}", e);
        }
        self.session_gate().await;
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::memory::{Fault, MemoryBackend};
    use crate::dashboard::{messages, Dashboard, RecordingScreen};
    use futures::executor::block_on;
    use serde_json::json;

    fn dashboard() -> Dashboard<MemoryBackend, RecordingScreen> {
        let backend = MemoryBackend::new();
        backend.add_account("ola@example.com", "secret", "u1");
        backend.insert(
            "landings",
            json!({"id": 1, "owner_id": "u1", "public_path": "/a", "active": true, "created_at": "2025-01-01"}),
        );
        Dashboard::new(backend, RecordingScreen::new())
    }

    #[test]
    fn test_gate_signed_out() {
        let dash = dashboard();
        block_on(dash.session_gate());
        let state = dash.screen().state();
        assert!(state.login_visible());
        assert!(dash.backend().selects().is_empty());
    }

    #[test]
    fn test_login_trims_email() {
        let dash = dashboard();
        block_on(dash.login("  ola@example.com ", "secret"));
        let state = dash.screen().state();
        assert_eq!(state.identity(), Some("ola@example.com"));
        assert_eq!(state.login_message, "");
        assert_eq!(state.landings.len(), 1);
    }

    #[test]
    fn test_login_failure_message() {
        let dash = dashboard();
        block_on(dash.login("ola@example.com", "wrong"));
        let state = dash.screen().state();
        assert!(state.login_visible());
        assert_eq!(state.login_message, messages::LOGIN_FAILED);
    }

    #[test]
    fn test_session_error_counts_as_signed_out() {
        let dash = dashboard();
        block_on(dash.login("ola@example.com", "secret"));
        dash.backend().fail(Fault::GetSession);
        block_on(dash.session_gate());
        assert!(dash.screen().state().login_visible());
    }

    #[test]
    fn test_logout_runs_gate_even_on_failure() {
        let dash = dashboard();
        block_on(dash.login("ola@example.com", "secret"));

        dash.backend().fail(Fault::SignOut);
        block_on(dash.logout());
        // Sign-out failed, session still there
        assert!(dash.screen().state().app_visible());

        dash.backend().heal();
        block_on(dash.logout());
        assert!(dash.screen().state().login_visible());
    }
}
