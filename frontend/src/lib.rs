//! Lead Panel - Frontend Rust/Leptos Application
//!
//! A WebAssembly dashboard for triaging the leads collected by an
//! account's landing pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (identity, logout)                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── LoginCard (signed out)                                  │
//! │  └── App card (signed in)                                    │
//! │      ├── Toolbar (landing, status filter, refresh, CSV)      │
//! │      └── LeadsTable (rows + status selectors)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All behaviour lives in `leadpanel::Dashboard`; components only render
//! its `AppState` and forward events to it.
//!
//! # Modules
//!
//! - [`config`] - Endpoint/key resolution and constants
//! - [`types`] - Auth/data API wire types
//! - [`components`] - UI components
//! - [`services`] - Supabase client and browser screen

use leadpanel::{AppState, Backend, Dashboard};
use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;
use std::rc::Rc;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{ApiErrorBody, TokenResponse};

// Components
pub use components::*;

// Services
pub use services::*;

/// The dashboard as shared through Leptos context.
pub type AppDashboard = Rc<Dashboard<SupabaseClient, BrowserScreen>>;

// =============================================================================
// Application Entry Point
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    // Global state for the application
    let state = create_rw_signal(AppState::default());

    let client = SupabaseClient::new(supabase_config());
    let auth_events = client.subscribe();
    let dashboard: AppDashboard = Rc::new(Dashboard::new(client, BrowserScreen::new(state)));
    provide_context(dashboard.clone());

    // Check the session once at startup, then again on every auth change
    spawn_local(async move {
        dashboard.session_gate().await;
        dashboard.run_auth_events(auth_events).await;
    });

    view! {
        <Header/>

        <div class="container">
            <LoginCard/>

            <div
                id="appCard"
                class="card"
                class:hide=move || state.with(|s| !s.app_visible())
            >
                <Toolbar/>
                <LeadsTable/>
            </div>
        </div>

        <Footer/>
    }
}
