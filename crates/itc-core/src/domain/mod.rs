mod all_time;
mod app_id;
mod credentials;
mod endpoint;
mod measure;
mod report_window;
mod retention;

pub use all_time::AllTimeSummary;
pub use app_id::{AppId, AppIdError};
pub use credentials::Credentials;
pub use endpoint::AnalyticsEndpoint;
pub use measure::{
    Frequency, MeasureSeries, MetricValue, Sample, ALL_TIME_MEASURES, DEFAULT_MEASURES,
};
pub use report_window::{parse_report_date, ReportWindow};
pub use retention::RetentionCohort;
