//! Lead table with an inline status selector per row.
//!
//! Rows are keyed by (render generation, lead id): every successful load
//! rebuilds all rows and their change handlers, while a status change within
//! one render only updates that row's selector.

use leadpanel::{LeadRow, LeadStatus};
use leptos::*;

use crate::AppDashboard;

#[component]
pub fn LeadsTable() -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let state = dashboard.screen().state();

    view! {
        <table class="leads">
            <thead>
                <tr>
                    <th>"Data"</th>
                    <th>"Imię"</th>
                    <th>"Email"</th>
                    <th>"Telefon"</th>
                    <th>"Status"</th>
                    <th>"Zmień status"</th>
                </tr>
            </thead>
            <tbody id="tbody">
                <For
                    each=move || {
                        state.with(|s| {
                            let generation = s.generation;
                            s.rows
                                .iter()
                                .cloned()
                                .map(|row| (generation, row))
                                .collect::<Vec<_>>()
                        })
                    }
                    key=|(generation, row)| (*generation, row.id.clone())
                    children=move |(_, row)| view! { <LeadRowItem row=row/> }
                />
            </tbody>
        </table>
    }
}

#[component]
fn LeadRowItem(row: LeadRow) -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let state = dashboard.screen().state();

    let is_selected = {
        let id = row.id.clone();
        move |status: LeadStatus| state.with(|s| s.row(&id).map(|r| r.selected) == Some(status))
    };

    let on_change = {
        let id = row.id.clone();
        move |ev: ev::Event| {
            let value = event_target_value(&ev);
            match value.parse::<LeadStatus>() {
                Ok(status) => {
                    log::info!("✏️ Lead {} -> {}", id, status);
                    let dashboard = dashboard.clone();
                    let id = id.clone();
                    spawn_local(async move {
                        dashboard.update_status(&id, status).await;
                    });
                }
                Err(e) => log::warn!("Ignoring status change: {}", e),
            }
        }
    };

    view! {
        <tr>
            <td>{row.created_at}</td>
            <td>{row.name}</td>
            <td>{row.email}</td>
            <td>{row.phone}</td>
            <td>{row.status_text}</td>
            <td>
                <select class="statusSel" data-id=row.id.to_string() on:change=on_change>
                    {LeadStatus::ALL
                        .into_iter()
                        .map(|status| {
                            let is_selected = is_selected.clone();
                            view! {
                                <option value=status.as_str() prop:selected=move || is_selected(status)>
                                    {status.as_str()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </td>
        </tr>
    }
}
