//! CSV export of the filtered lead list.

use super::leads::lead_query;
use super::{messages, Dashboard, Screen};
use crate::backend::{decode_rows, Backend};
use crate::config::EXPORT_LIMIT;
use crate::format::csv_line;
use crate::models::ExportRecord;

/// Name of the downloaded file.
pub const EXPORT_FILE_NAME: &str = "leads.csv";

/// MIME type of the downloaded file.
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8";

/// A file handed to the browser for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: String,
    pub body: String,
}

/// Header line plus one escaped line per record, joined by `\n`.
pub fn build_csv(records: &[ExportRecord]) -> String {
    let header = ExportRecord::COLUMNS.join(",");
    std::iter::once(header)
        .chain(records.iter().map(|r| csv_line(r.cells())))
        .collect::<Vec<_>>()
        .join("\n")
}

impl<B: Backend, S: Screen> Dashboard<B, S> {
    /// Download the leads matching the current landing and status filter.
    ///
    /// Fetches its own rows (up to the export cap) instead of reusing the
    /// table, so the file is not limited to what is on screen.
    pub async fn export_csv(&self) {
        let (landing, status) = self
            .screen
            .read(|s| (s.selected_landing.clone(), s.status_filter));
        let Some(landing) = landing else {
            return;
        };

        let query = lead_query(&landing, status, &ExportRecord::COLUMNS, EXPORT_LIMIT);
        let records = match self
            .backend
            .select(&query)
            .await
            .and_then(decode_rows::<ExportRecord>)
        {
            Ok(records) => records,
            Err(e) => {
                log::error!("❌ Export of landing {} failed: {}", landing, e);
                self.screen.alert(messages::EXPORT_FAILED);
                return;
            }
        };

        log::info!("📄 Exporting {} leads", records.len());
        self.screen.download(ExportFile {
            name: EXPORT_FILE_NAME.to_string(),
            mime: EXPORT_MIME.to_string(),
            body: build_csv(&records),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_csv() {
        let records = vec![
            ExportRecord {
                created_at: Some("2025-02-01T09:00:00+00:00".into()),
                name: Some("Kowalski, Jan".into()),
                email: Some("jan@example.com".into()),
                phone: None,
                status: Some("seen".into()),
            },
            ExportRecord::default(),
        ];
        assert_eq!(
            build_csv(&records),
            "created_at,name,email,phone,status\n\
             2025-02-01T09:00:00+00:00,\"Kowalski, Jan\",jan@example.com,,seen\n\
             ,,,,"
        );
    }

    #[test]
    fn test_build_csv_header_only() {
        assert_eq!(build_csv(&[]), "created_at,name,email,phone,status");
    }
}
