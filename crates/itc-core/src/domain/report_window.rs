use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date range of a time-series request. A missing start lets the server
/// pick its default, usually the creation date of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl ReportWindow {
    pub fn ending(end: NaiveDate) -> Self {
        Self { start: None, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    pub fn api_start_time(&self) -> Option<String> {
        self.start.map(format_api_time)
    }

    pub fn api_end_time(&self) -> String {
        format_api_time(self.end)
    }
}

fn format_api_time(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Normalizes the date formats the analytics API returns to a calendar day.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
