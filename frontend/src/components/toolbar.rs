//! Landing selector, status filter, refresh and CSV export controls.

use leadpanel::{LeadStatus, RowId};
use leptos::*;

use crate::AppDashboard;

#[component]
pub fn Toolbar() -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let state = dashboard.screen().state();

    let on_landing_change = {
        let dashboard = dashboard.clone();
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            let landing = (!value.is_empty()).then(|| RowId::new(value));
            let dashboard = dashboard.clone();
            spawn_local(async move {
                dashboard.select_landing(landing).await;
            });
        }
    };

    let on_status_change = {
        let dashboard = dashboard.clone();
        move |ev: ev::Event| {
            // "" means all statuses
            let status = event_target_value(&ev).parse::<LeadStatus>().ok();
            let dashboard = dashboard.clone();
            spawn_local(async move {
                dashboard.set_status_filter(status).await;
            });
        }
    };

    let on_refresh = {
        let dashboard = dashboard.clone();
        move |_: ev::MouseEvent| {
            let dashboard = dashboard.clone();
            spawn_local(async move {
                dashboard.refresh().await;
            });
        }
    };

    let on_export = move |_: ev::MouseEvent| {
        let dashboard = dashboard.clone();
        spawn_local(async move {
            dashboard.export_csv().await;
        });
    };

    view! {
        <div class="toolbar">
            <select id="landingSelect" on:change=on_landing_change>
                <For
                    each=move || state.with(|s| s.landings.clone())
                    key=|option| (option.id.clone(), option.label.clone())
                    children=move |option| {
                        let id = option.id.clone();
                        let is_selected = move || {
                            state.with(|s| s.selected_landing.as_ref() == Some(&id))
                        };
                        view! {
                            <option value=option.id.to_string() prop:selected=is_selected>
                                {option.label}
                            </option>
                        }
                    }
                />
            </select>

            <select id="statusFilter" on:change=on_status_change>
                <option value="" prop:selected=move || state.with(|s| s.status_filter.is_none())>
                    "wszystkie"
                </option>
                {LeadStatus::ALL
                    .into_iter()
                    .map(|status| {
                        view! {
                            <option
                                value=status.as_str()
                                prop:selected=move || state.with(|s| s.status_filter == Some(status))
                            >
                                {status.as_str()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>

            <button id="refreshBtn" class="btn btn-secondary" on:click=on_refresh>
                "Odśwież"
            </button>
            <button id="csvBtn" class="btn btn-primary" on:click=on_export>
                "Eksport CSV"
            </button>
        </div>
        <div id="info" class="info">
            {move || state.with(|s| s.info.clone())}
        </div>
    }
}
