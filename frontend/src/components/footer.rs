//! Footer component

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>
                {APP_NAME} " • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span>
            </div>
        </footer>
    }
}
