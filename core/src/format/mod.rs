//! Formatting helpers: timestamps for the lead table and CSV cells.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Layout of a Polish (`pl-PL`) locale date-time, e.g. `1.03.2025, 11:00:00`.
const PL_DATE_TIME: &str = "%-d.%m.%Y, %H:%M:%S";

/// Format a backend timestamp in the browser's local time zone.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    format_timestamp_in(iso, &Local)
}

/// Format a backend timestamp in the given time zone.
///
/// Offset-aware values (RFC 3339) are converted; naive values are taken to
/// already be in `tz`.
pub fn format_timestamp_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(tz).format(PL_DATE_TIME).to_string();
    }
    // Postgres `timestamp` without zone, with or without fractional seconds
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
                return dt.format(PL_DATE_TIME).to_string();
            }
        }
    }
    iso.to_string()
}

/// Escape a single CSV cell.
///
/// A cell containing a comma, a double quote or a newline is wrapped in
/// double quotes with inner quotes doubled; anything else is left as is.
pub fn escape_csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join escaped cells into one CSV line.
pub fn csv_line<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(escape_csv_field)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_timestamp_utc() {
        assert_eq!(
            format_timestamp_in("2025-03-01T10:05:09.123456+00:00", &Utc),
            "1.03.2025, 10:05:09"
        );
    }

    #[test]
    fn test_format_timestamp_converts_offset() {
        let warsaw_summer = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp_in("2025-07-14T23:30:00Z", &warsaw_summer),
            "15.07.2025, 01:30:00"
        );
    }

    #[test]
    fn test_format_timestamp_naive() {
        assert_eq!(
            format_timestamp_in("2024-12-24 18:00:00", &Utc),
            "24.12.2024, 18:00:00"
        );
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp_in("yesterday", &Utc), "yesterday");
        assert_eq!(format_timestamp_in("", &Utc), "");
    }

    #[test]
    fn test_escape_plain_field() {
        assert_eq!(escape_csv_field("Jan Kowalski"), "Jan Kowalski");
        assert_eq!(escape_csv_field(""), "");
        // Carriage returns alone do not trigger quoting
        assert_eq!(escape_csv_field("a\rb"), "a\rb");
    }

    #[test]
    fn test_escape_special_fields() {
        assert_eq!(escape_csv_field("Kowalski, Jan"), "\"Kowalski, Jan\"");
        assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_field("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_escape_roundtrip_with_csv_reader() {
        let samples = [
            "plain",
            "with, comma",
            "with \"quotes\"",
            "multi\nline",
            "all, \"three\"\nat once",
        ];
        let line = csv_line(samples.iter().copied());

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(line.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        let parsed: Vec<&str> = record.iter().collect();
        assert_eq!(parsed, samples);
        assert!(line.starts_with("plain,"));
    }
}
