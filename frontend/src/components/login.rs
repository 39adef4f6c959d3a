//! Login card: email/password form shown while signed out.

use leptos::*;

use crate::AppDashboard;

#[component]
pub fn LoginCard() -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let state = dashboard.screen().state();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (is_signing_in, set_is_signing_in) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let dashboard = dashboard.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();

        set_is_signing_in.set(true);
        spawn_local(async move {
            dashboard.login(&email, &password).await;
            set_is_signing_in.set(false);
        });
    };

    view! {
        <div
            id="loginCard"
            class="card"
            class:hide=move || state.with(|s| !s.login_visible())
        >
            <h2>"Logowanie"</h2>
            <form on:submit=on_submit>
                <input
                    id="email"
                    type="email"
                    placeholder="email"
                    autocomplete="username"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    id="pass"
                    type="password"
                    placeholder="hasło"
                    autocomplete="current-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button
                    id="loginBtn"
                    type="submit"
                    class="btn btn-primary"
                    disabled=is_signing_in
                >
                    {move || if is_signing_in.get() { "Logowanie..." } else { "Zaloguj" }}
                </button>
            </form>
            <div id="loginMsg" class="error-message">
                {move || state.with(|s| s.login_message.clone())}
            </div>
        </div>
    }
}
