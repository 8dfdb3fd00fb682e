use chrono::NaiveDate;
use thiserror::Error;

use super::TransportError;
use crate::domain::{AllTimeSummary, AppId, MeasureSeries, ReportWindow, RetentionCohort};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("login form not found on {url}: {message}")]
    Parse { url: String, message: String },

    #[error("User or password incorrect.")]
    Authentication,

    #[error("unexpected response from {endpoint}: {message}")]
    Api { endpoint: String, message: String },
}

/// Source of the three analytics reports. Every call authenticates first.
pub trait AnalyticsGateway {
    fn measures(
        &mut self,
        app_id: &AppId,
        window: ReportWindow,
        measure_names: &[String],
    ) -> Result<Vec<MeasureSeries>, AnalyticsError>;

    fn all_time(&mut self, app_id: &AppId) -> Result<AllTimeSummary, AnalyticsError>;

    fn retention(
        &mut self,
        app_id: &AppId,
        end_time: NaiveDate,
    ) -> Result<Vec<RetentionCohort>, AnalyticsError>;
}
