//! In-memory implementation of [`Backend`].
//!
//! # Purpose
//! Runs the dashboard without a network: local development and tests.
//!
//! # Access control
//! Mirrors the row-level policies of the hosted database:
//! - a `landings` row is visible when its `owner_id` equals the signed-in user id
//! - a `leads` row is visible when its `landing_id` points at a visible landing
//! - without a session nothing is visible (empty result, not an error)
//!
//! Updates silently touch zero rows when nothing visible matches, the same
//! way the HTTP API answers `204` for a filtered-out `PATCH`.
//!
//! # Test hooks
//! Every `select` and `update` is recorded, and [`Fault`]s make chosen
//! operations fail until [`MemoryBackend::heal`] is called.

use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::{AuthChannel, AuthEvent, AuthEvents, Backend, Select, Update};
use crate::error::{BackendError, BackendResult};
use crate::models::{Session, User};

/// Operation forced to fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fault {
    GetSession,
    SignOut,
    /// Reads from the named collection
    Select(String),
    /// Writes to the named collection
    Update(String),
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    user: User,
}

/// In-process backend with per-owner visibility.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    accounts: RefCell<Vec<Account>>,
    session: RefCell<Option<Session>>,
    tables: RefCell<HashMap<String, Vec<Map<String, Value>>>>,
    selects: RefCell<Vec<Select>>,
    updates: RefCell<Vec<Update>>,
    faults: RefCell<HashSet<Fault>>,
    token_counter: Cell<u64>,
    auth: AuthChannel,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user that can sign in with `email` / `password`.
    pub fn add_account(&self, email: &str, password: &str, user_id: &str) {
        self.accounts.borrow_mut().push(Account {
            email: email.to_string(),
            password: password.to_string(),
            user: User {
                id: user_id.to_string(),
                email: Some(email.to_string()),
            },
        });
    }

    /// Insert a row. Non-object values are ignored.
    pub fn insert(&self, collection: &str, row: Value) {
        if let Value::Object(map) = row {
            self.tables
                .borrow_mut()
                .entry(collection.to_string())
                .or_default()
                .push(map);
        }
    }

    /// Raw rows of a collection, ignoring access control.
    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.tables
            .borrow()
            .get(collection)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Install a session directly, as if restored from storage.
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.borrow_mut() = session;
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().as_ref().map(|s| s.user.clone())
    }

    /// Push an auth event to subscribers, e.g. a token refresh.
    pub fn emit(&self, event: AuthEvent) {
        self.auth.emit(event);
    }

    /// Drop all auth subscriptions so event loops terminate.
    pub fn close_auth_channel(&self) {
        self.auth.close();
    }

    pub fn fail(&self, fault: Fault) {
        self.faults.borrow_mut().insert(fault);
    }

    pub fn heal(&self) {
        self.faults.borrow_mut().clear();
    }

    /// Every `select` received so far.
    pub fn selects(&self) -> Vec<Select> {
        self.selects.borrow().clone()
    }

    /// `select`s received for one collection.
    pub fn selects_on(&self, collection: &str) -> Vec<Select> {
        self.selects
            .borrow()
            .iter()
            .filter(|q| q.collection == collection)
            .cloned()
            .collect()
    }

    /// Every `update` received so far.
    pub fn updates(&self) -> Vec<Update> {
        self.updates.borrow().clone()
    }

    pub fn clear_history(&self) {
        self.selects.borrow_mut().clear();
        self.updates.borrow_mut().clear();
    }

    fn check(&self, fault: Fault) -> BackendResult<()> {
        if self.faults.borrow().contains(&fault) {
            return Err(BackendError::Status {
                status: 500,
                message: format!("injected fault: {:?}", fault),
            });
        }
        Ok(())
    }

    fn visible_landing_ids(&self, user: &User) -> HashSet<String> {
        self.tables
            .borrow()
            .get("landings")
            .map(|rows| {
                rows.iter()
                    .filter(|row| cell_text(row.get("owner_id")).as_deref() == Some(user.id.as_str()))
                    .filter_map(|row| cell_text(row.get("id")))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_visible(&self, collection: &str, row: &Map<String, Value>, landing_ids: &HashSet<String>) -> bool {
        let key = match collection {
            "landings" => "id",
            "leads" => "landing_id",
            _ => return false,
        };
        cell_text(row.get(key))
            .map(|id| landing_ids.contains(&id))
            .unwrap_or(false)
    }
}

/// Text form of a cell for equality comparison.
fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches_filters(row: &Map<String, Value>, filters: &[super::Filter]) -> bool {
    filters
        .iter()
        .all(|f| cell_text(row.get(&f.column)).as_deref() == Some(f.value.as_str()))
}

fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => cell_text(a).cmp(&cell_text(b)),
    }
}

fn project(row: &Map<String, Value>, fields: &[String]) -> Value {
    if fields.is_empty() {
        return Value::Object(row.clone());
    }
    let projected = fields
        .iter()
        .map(|f| (f.clone(), row.get(f).cloned().unwrap_or(Value::Null)))
        .collect();
    Value::Object(projected)
}

impl Backend for MemoryBackend {
    async fn get_session(&self) -> BackendResult<Option<Session>> {
        self.check(Fault::GetSession)?;
        Ok(self.session.borrow().clone())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> BackendResult<Session> {
        let account = self
            .accounts
            .borrow()
            .iter()
            .find(|a| a.email == email && a.password == password)
            .cloned()
            .ok_or_else(|| BackendError::AuthRejected("Invalid login credentials".to_string()))?;

        let n = self.token_counter.get() + 1;
        self.token_counter.set(n);
        let session = Session {
            access_token: format!("access-{}-{}", account.user.id, n),
            refresh_token: Some(format!("refresh-{}-{}", account.user.id, n)),
            expires_at: None,
            user: account.user,
        };
        *self.session.borrow_mut() = Some(session.clone());
        self.auth.emit(AuthEvent::SignedIn);
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.check(Fault::SignOut)?;
        *self.session.borrow_mut() = None;
        self.auth.emit(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> AuthEvents {
        self.auth.subscribe()
    }

    async fn select(&self, query: &Select) -> BackendResult<Vec<Value>> {
        self.selects.borrow_mut().push(query.clone());
        self.check(Fault::Select(query.collection.clone()))?;

        let Some(user) = self.current_user() else {
            return Ok(Vec::new());
        };
        let landing_ids = self.visible_landing_ids(&user);

        let tables = self.tables.borrow();
        let mut rows: Vec<&Map<String, Value>> = tables
            .get(&query.collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| self.is_visible(&query.collection, row, &landing_ids))
                    .filter(|row| matches_filters(row, &query.filters))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_cells(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows.into_iter().map(|row| project(row, &query.fields)).collect())
    }

    async fn update(&self, update: &Update) -> BackendResult<()> {
        self.updates.borrow_mut().push(update.clone());
        self.check(Fault::Update(update.collection.clone()))?;

        let Some(user) = self.current_user() else {
            return Ok(());
        };
        let landing_ids = self.visible_landing_ids(&user);

        let mut tables = self.tables.borrow_mut();
        if let Some(rows) = tables.get_mut(&update.collection) {
            for row in rows.iter_mut() {
                if self.is_visible(&update.collection, row, &landing_ids)
                    && matches_filters(row, &update.filters)
                {
                    for (column, value) in &update.values {
                        row.insert(column.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }
}
