use leptos::*;

use crate::{AppDashboard, APP_NAME};

#[component]
pub fn Header() -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let state = dashboard.screen().state();

    let on_logout = move |_: ev::MouseEvent| {
        log::info!("👋 Signing out...");
        let dashboard = dashboard.clone();
        spawn_local(async move {
            dashboard.logout().await;
        });
    };

    view! {
        <header>
            <div class="header-left">
                <span class="logo">{APP_NAME}</span>
            </div>
            <div class="header-right">
                <span
                    id="who"
                    class="badge"
                    class:hide=move || state.with(|s| !s.app_visible())
                >
                    {move || state.with(|s| s.identity().unwrap_or_default().to_string())}
                </span>
                <button
                    id="logoutBtn"
                    class="btn btn-secondary"
                    class:hide=move || state.with(|s| !s.app_visible())
                    on:click=on_logout
                >
                    "Wyloguj"
                </button>
            </div>
        </header>
    }
}
