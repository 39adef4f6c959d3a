//! Lead loader, status filter and status updater.

use super::{messages, Dashboard, LeadRow, Screen};
use crate::backend::{decode_rows, Backend, Select, Update};
use crate::config::LEAD_PAGE_LIMIT;
use crate::models::{Lead, LeadStatus, RowId};

const LEAD_COLUMNS: [&str; 6] = ["id", "created_at", "name", "email", "phone", "status"];

/// Leads of one landing, newest first, optionally with one status.
pub(super) fn lead_query(
    landing: &RowId,
    status: Option<LeadStatus>,
    columns: &[&str],
    limit: usize,
) -> Select {
    let mut query = Select::table("leads")
        .columns(columns)
        .eq("landing_id", landing.as_str())
        .order("created_at", false)
        .limit(limit);
    if let Some(status) = status {
        query = query.eq("status", status.as_str());
    }
    query
}

impl<B: Backend, S: Screen> Dashboard<B, S> {
    /// Render the leads of the selected landing.
    ///
    /// Without a selected landing the table is emptied and nothing is
    /// fetched. On failure the previous rows stay on screen.
    pub async fn load_leads(&self) {
        let (landing, status) = self
            .screen
            .read(|s| (s.selected_landing.clone(), s.status_filter));
        let Some(landing) = landing else {
            self.screen.update(|s| s.clear_rows());
            return;
        };

        let query = lead_query(&landing, status, &LEAD_COLUMNS, LEAD_PAGE_LIMIT);
        let leads = match self.backend.select(&query).await.and_then(decode_rows::<Lead>) {
            Ok(leads) => leads,
            Err(e) => {
                log::error!("❌ Failed to load leads for landing {}: {}", landing, e);
                self.screen
                    .update(|s| s.info = messages::LEADS_FAILED.to_string());
                return;
            }
        };

        let rows: Vec<LeadRow> = leads.iter().map(LeadRow::from).collect();
        self.screen.update(|s| {
            s.info = messages::lead_count(rows.len());
            s.replace_rows(rows);
        });
    }

    /// Change the status filter (`None` = all) and reload.
    pub async fn set_status_filter(&self, status: Option<LeadStatus>) {
        self.screen.update(|s| s.status_filter = status);
        self.load_leads().await;
    }

    /// Persist a status picked in a row's selector.
    ///
    /// On failure the user is alerted and the whole table is reloaded so the
    /// selector shows what the backend actually holds.
    pub async fn update_status(&self, lead: &RowId, status: LeadStatus) {
        self.screen.update(|s| {
            if let Some(row) = s.row_mut(lead) {
                row.selected = status;
            }
        });

        let update = Update::table("leads")
            .set("status", status.as_str())
            .eq("id", lead.as_str());
        if let Err(e) = self.backend.update(&update).await {
            log::error!("❌ Failed to set status of lead {} to {}: {}", lead, status, e);
            self.screen.alert(messages::STATUS_UPDATE_FAILED);
            self.load_leads().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{Fault, MemoryBackend};
    use crate::dashboard::RecordingScreen;
    use futures::executor::block_on;
    use serde_json::json;

    fn dashboard() -> Dashboard<MemoryBackend, RecordingScreen> {
        let backend = MemoryBackend::new();
        backend.add_account("ola@example.com", "secret", "u1");
        backend.insert("landings", json!({"id": 1, "owner_id": "u1", "public_path": "/a", "active": true, "created_at": "2025-01-01"}));
        backend.insert("leads", json!({"id": "L1", "landing_id": 1, "name": "Anna", "email": "anna@example.com", "phone": "500", "status": "new", "created_at": "2025-02-01T09:00:00Z"}));
        backend.insert("leads", json!({"id": "L2", "landing_id": 1, "name": null, "status": null, "created_at": "2025-02-02T09:00:00Z"}));
        backend.insert("leads", json!({"id": "L3", "landing_id": 1, "name": "Bartek", "status": "seen", "created_at": "2025-02-03T09:00:00Z"}));
        let dash = Dashboard::new(backend, RecordingScreen::new());
        block_on(dash.login("ola@example.com", "secret"));
        dash
    }

    #[test]
    fn test_rows_rendered_newest_first() {
        let dash = dashboard();
        let state = dash.screen().state();
        let ids: Vec<&str> = state.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["L3", "L2", "L1"]);
        assert_eq!(state.info, "Leadów: 3");

        let blank = state.row(&RowId::new("L2")).unwrap();
        assert_eq!(blank.name, "");
        assert_eq!(blank.status_text, "new");
        assert_eq!(blank.selected, LeadStatus::New);
    }

    #[test]
    fn test_query_scoped_by_landing_and_status() {
        let dash = dashboard();
        dash.backend().clear_history();

        block_on(dash.set_status_filter(Some(LeadStatus::Seen)));
        let query = dash.backend().selects_on("leads").pop().unwrap();
        assert_eq!(query.filter_value("landing_id"), Some("1"));
        assert_eq!(query.filter_value("status"), Some("seen"));
        assert_eq!(query.limit, Some(LEAD_PAGE_LIMIT));
        assert_eq!(dash.screen().state().rows.len(), 1);

        block_on(dash.set_status_filter(None));
        let query = dash.backend().selects_on("leads").pop().unwrap();
        assert_eq!(query.filter_value("status"), None);
        assert_eq!(dash.screen().state().rows.len(), 3);
    }

    #[test]
    fn test_no_landing_clears_rows_without_query() {
        let dash = dashboard();
        dash.backend().clear_history();
        block_on(dash.select_landing(None));
        assert!(dash.screen().state().rows.is_empty());
        assert!(dash.backend().selects().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_rows() {
        let dash = dashboard();
        dash.backend().fail(Fault::Select("leads".into()));
        block_on(dash.load_leads());
        let state = dash.screen().state();
        assert_eq!(state.rows.len(), 3);
        assert_eq!(state.info, messages::LEADS_FAILED);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let dash = dashboard();
        block_on(dash.set_status_filter(Some(LeadStatus::Contacted)));
        let state = dash.screen().state();
        assert!(state.rows.is_empty());
        assert_eq!(state.info, "Leadów: 0");
    }

    #[test]
    fn test_update_status_success() {
        let dash = dashboard();
        dash.backend().clear_history();
        block_on(dash.update_status(&RowId::new("L1"), LeadStatus::Contacted));

        let update = dash.backend().updates().pop().unwrap();
        assert_eq!(update.body(), json!({"status": "contacted"}));
        assert_eq!(update.filters[0].value, "L1");
        // No reload on success
        assert!(dash.backend().selects().is_empty());
        assert!(dash.screen().alerts().is_empty());

        let state = dash.screen().state();
        let row = state.row(&RowId::new("L1")).unwrap();
        assert_eq!(row.selected, LeadStatus::Contacted);
        assert_eq!(row.status_text, "new");
    }
}
