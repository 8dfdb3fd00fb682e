use chrono::NaiveDate;
use itc_core::{
    AllTimeSummary, AnalyticsError, AnalyticsGateway, AppId, MeasureSeries, ReportWindow,
    RetentionCohort, TransportError,
};

pub struct FailingAnalyticsGateway {
    error: AnalyticsError,
}

impl FailingAnalyticsGateway {
    pub fn authentication_error() -> Self {
        Self {
            error: AnalyticsError::Authentication,
        }
    }

    pub fn network_error() -> Self {
        Self {
            error: AnalyticsError::Transport(TransportError::Connection {
                url: "https://itunesconnect.apple.com".to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }

    pub fn with_error(error: AnalyticsError) -> Self {
        Self { error }
    }
}

impl AnalyticsGateway for FailingAnalyticsGateway {
    fn measures(
        &mut self,
        _app_id: &AppId,
        _window: ReportWindow,
        _measure_names: &[String],
    ) -> Result<Vec<MeasureSeries>, AnalyticsError> {
        Err(self.error.clone())
    }

    fn all_time(&mut self, _app_id: &AppId) -> Result<AllTimeSummary, AnalyticsError> {
        Err(self.error.clone())
    }

    fn retention(
        &mut self,
        _app_id: &AppId,
        _end_time: NaiveDate,
    ) -> Result<Vec<RetentionCohort>, AnalyticsError> {
        Err(self.error.clone())
    }
}
