//! Identity and data backend abstraction.
//!
//! The dashboard talks to a hosted service that provides three capability
//! groups, all behind the [`Backend`] trait:
//!
//! | Group    | Operations                                                 |
//! |----------|------------------------------------------------------------|
//! | Auth     | `get_session`, `sign_in_with_password`, `sign_out`, `subscribe` |
//! | Query    | `select` (columns, equality filters, order, limit)         |
//! | Mutation | `update` (values, equality filters)                        |
//!
//! Row-level access control is enforced by the backend. Implementations
//! return exactly the rows the signed-in identity may see and the dashboard
//! never filters them further.
//!
//! # Implementations
//!
//! - `SupabaseClient` in the frontend crate (HTTP, browser only)
//! - [`memory::MemoryBackend`] - in-process, for tests

pub mod memory;
pub mod query;

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;

use crate::error::BackendResult;
use crate::models::Session;

pub use query::{Filter, Order, Select, Update};

// =============================================================================
// Auth Events
// =============================================================================

/// Authentication state transition pushed by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Receiving end of an auth-change subscription.
pub type AuthEvents = UnboundedReceiver<AuthEvent>;

/// Fan-out channel for [`AuthEvent`]s.
///
/// Subscribers whose receiver was dropped are pruned on the next emit.
#[derive(Debug, Default)]
pub struct AuthChannel {
    subscribers: RefCell<Vec<UnboundedSender<AuthEvent>>>,
}

impl AuthChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> AuthEvents {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    pub fn emit(&self, event: AuthEvent) {
        log::debug!("auth event: {:?}", event);
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.unbounded_send(event).is_ok());
    }

    /// Close every subscription.
    pub fn close(&self) {
        self.subscribers.borrow_mut().clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Identity plus data service consumed by the dashboard.
///
/// Futures are not required to be `Send`: everything runs on the browser's
/// single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Current session, or `None` when nobody is signed in.
    async fn get_session(&self) -> BackendResult<Option<Session>>;

    /// Sign in with email and password.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session>;

    /// End the current session.
    async fn sign_out(&self) -> BackendResult<()>;

    /// Subscribe to auth state transitions.
    fn subscribe(&self) -> AuthEvents;

    /// Read rows as JSON objects.
    async fn select(&self, query: &Select) -> BackendResult<Vec<Value>>;

    /// Write column values to the matching rows.
    async fn update(&self, update: &Update) -> BackendResult<()>;
}

/// Decode JSON rows into typed records.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> BackendResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}
