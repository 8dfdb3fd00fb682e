use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEndpoint {
    Measures,
    AllTime,
    Retention,
}

impl AnalyticsEndpoint {
    /// Path relative to the analytics data base url.
    pub fn path(&self) -> &'static str {
        match self {
            AnalyticsEndpoint::Measures => "app/detail/measures",
            AnalyticsEndpoint::AllTime => "app/detail/all-time",
            AnalyticsEndpoint::Retention => "retention",
        }
    }
}

impl fmt::Display for AnalyticsEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.path())
    }
}
