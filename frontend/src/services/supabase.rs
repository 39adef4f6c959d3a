//! HTTP client for the hosted auth (GoTrue) and data (PostgREST) APIs.
//!
//! Implements [`Backend`] for the browser. The session lives in memory and
//! is mirrored to `localStorage` so a page reload stays signed in; it is
//! refreshed transparently when it is about to expire.

use gloo_net::http::{Request, Response};
use leadpanel::config::{SUPABASE_ANON_KEY, SUPABASE_URL};
use leadpanel::{
    AuthChannel, AuthEvent, AuthEvents, Backend, BackendError, BackendResult, Select, Session,
    SupabaseConfig, Update,
};
use serde_json::{json, Value};
use std::cell::RefCell;

use crate::config::{REFRESH_MARGIN_SECS, SESSION_STORAGE_KEY};
use crate::types::{ApiErrorBody, TokenResponse};

/// Current time as unix seconds.
fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn http_error(err: gloo_net::Error) -> BackendError {
    BackendError::Http(err.to_string())
}

/// Turn a non-2xx response into a [`BackendError::Status`].
async fn ensure_ok(response: Response) -> BackendResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let raw = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status,
        message: ApiErrorBody::describe(&raw),
    })
}

/// Browser client for one project.
pub struct SupabaseClient {
    config: SupabaseConfig,
    session: RefCell<Option<Session>>,
    auth: AuthChannel,
}

impl SupabaseClient {
    /// Create a client, restoring a persisted session if there is one.
    pub fn new(config: SupabaseConfig) -> Self {
        let session = local_storage()
            .and_then(|storage| storage.get_item(SESSION_STORAGE_KEY).ok().flatten())
            .and_then(|raw| serde_json::from_str::<Session>(&raw).ok());
        if let Some(session) = &session {
            log::info!("🔑 Restored session for {}", session.user.display_name());
        }

        Self {
            config,
            session: RefCell::new(session),
            auth: AuthChannel::new(),
        }
    }

    fn anon_key(&self) -> BackendResult<&str> {
        self.config
            .anon_key
            .as_deref()
            .ok_or_else(|| BackendError::NotConfigured(SUPABASE_ANON_KEY.to_string()))
    }

    fn auth_url(&self, endpoint: &str) -> BackendResult<String> {
        self.config
            .auth_url(endpoint)
            .ok_or_else(|| BackendError::NotConfigured(SUPABASE_URL.to_string()))
    }

    fn rest_url(&self, collection: &str) -> BackendResult<String> {
        self.config
            .rest_url(collection)
            .ok_or_else(|| BackendError::NotConfigured(SUPABASE_URL.to_string()))
    }

    /// Replace the session in memory and in `localStorage`.
    fn store_session(&self, session: Option<Session>) {
        if let Some(storage) = local_storage() {
            let result = match &session {
                Some(s) => match serde_json::to_string(s) {
                    Ok(raw) => storage.set_item(SESSION_STORAGE_KEY, &raw),
                    Err(e) => {
                        log::warn!("Could not serialize session: {}", e);
                        Ok(())
                    }
                },
                None => storage.remove_item(SESSION_STORAGE_KEY),
            };
            if let Err(e) = result {
                log::warn!("Could not persist session: {:?}", e);
            }
        }
        *self.session.borrow_mut() = session;
    }

    /// Call the token endpoint with the given grant.
    async fn token_request(&self, grant_type: &str, body: &Value) -> BackendResult<Session> {
        let url = self.auth_url("token")?;
        let key = self.anon_key()?;

        let response = Request::post(&url)
            .query([("grant_type", grant_type)])
            .header("apikey", key)
            .json(body)
            .map_err(http_error)?
            .send()
            .await
            .map_err(http_error)?;

        let response = ensure_ok(response).await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(token.into_session(now_secs()))
    }

    /// Exchange the refresh token for a new session.
    async fn refresh(&self, session: &Session) -> BackendResult<Option<Session>> {
        let Some(refresh_token) = session.refresh_token.as_deref() else {
            log::warn!("Session expired and has no refresh token");
            self.store_session(None);
            self.auth.emit(AuthEvent::SignedOut);
            return Ok(None);
        };

        match self
            .token_request("refresh_token", &json!({ "refresh_token": refresh_token }))
            .await
        {
            Ok(fresh) => {
                log::info!("🔄 Access token refreshed");
                self.store_session(Some(fresh.clone()));
                self.auth.emit(AuthEvent::TokenRefreshed);
                Ok(Some(fresh))
            }
            Err(BackendError::Status { status, message }) if (400..500).contains(&status) => {
                log::warn!("Refresh token rejected ({}): {}", status, message);
                self.store_session(None);
                self.auth.emit(AuthEvent::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Token for the `Authorization` header: the user's access token, or
    /// the anon key when signed out.
    async fn bearer(&self) -> BackendResult<String> {
        match self.get_session().await? {
            Some(session) => Ok(session.access_token),
            None => Ok(self.anon_key()?.to_string()),
        }
    }
}

impl Backend for SupabaseClient {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        let current = self.session.borrow().clone();
        match current {
            Some(session) if session.expires_within(now_secs(), REFRESH_MARGIN_SECS) => {
                self.refresh(&session).await
            }
            other => Ok(other),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        let body = json!({ "email": email, "password": password });
        let session = self
            .token_request("password", &body)
            .await
            .map_err(|e| match e {
                BackendError::Status { status, message } if (400..500).contains(&status) => {
                    BackendError::AuthRejected(message)
                }
                other => other,
            })?;

        self.store_session(Some(session.clone()));
        self.auth.emit(AuthEvent::SignedIn);
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let token = self.session.borrow().as_ref().map(|s| s.access_token.clone());
        let result = match token {
            Some(token) => self.revoke(&token).await,
            None => Ok(()),
        };

        // Local sign-out happens even if the server call failed
        self.store_session(None);
        self.auth.emit(AuthEvent::SignedOut);
        result
    }

    fn subscribe(&self) -> AuthEvents {
        self.auth.subscribe()
    }

    async fn select(&self, query: &Select) -> BackendResult<Vec<Value>> {
        let url = self.rest_url(&query.collection)?;
        let key = self.anon_key()?;
        let bearer = self.bearer().await?;
        let params = query.params();

        let response = Request::get(&url)
            .query(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .header("apikey", key)
            .header("Authorization", &format!("Bearer {}", bearer))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(http_error)?;

        ensure_ok(response)
            .await?
            .json::<Vec<Value>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn update(&self, update: &Update) -> BackendResult<()> {
        let url = self.rest_url(&update.collection)?;
        let key = self.anon_key()?;
        let bearer = self.bearer().await?;
        let params = update.params();

        let response = Request::patch(&url)
            .query(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .header("apikey", key)
            .header("Authorization", &format!("Bearer {}", bearer))
            .header("Prefer", "return=minimal")
            .json(&update.body())
            .map_err(http_error)?
            .send()
            .await
            .map_err(http_error)?;

        ensure_ok(response).await.map(|_| ())
    }
}

impl SupabaseClient {
    /// Revoke the session server-side.
    async fn revoke(&self, access_token: &str) -> BackendResult<()> {
        let url = self.auth_url("logout")?;
        let key = self.anon_key()?;

        let response = Request::post(&url)
            .header("apikey", key)
            .header("Authorization", &format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(http_error)?;

        ensure_ok(response).await.map(|_| ())
    }
}
