use chrono::NaiveDate;
use itc_core::{
    AllTimeSummary, AnalyticsError, AnalyticsGateway, AppId, MeasureSeries, ReportWindow,
    RetentionCohort,
};

/// Returns fixed report data and remembers the arguments of the last call.
#[derive(Default)]
pub struct StubAnalyticsGateway {
    measures: Vec<MeasureSeries>,
    all_time: AllTimeSummary,
    retention: Vec<RetentionCohort>,
    last_window: Option<ReportWindow>,
    last_measure_names: Vec<String>,
}

impl StubAnalyticsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measures(mut self, measures: Vec<MeasureSeries>) -> Self {
        self.measures = measures;
        self
    }

    pub fn with_all_time(mut self, all_time: AllTimeSummary) -> Self {
        self.all_time = all_time;
        self
    }

    pub fn with_retention(mut self, retention: Vec<RetentionCohort>) -> Self {
        self.retention = retention;
        self
    }

    pub fn last_window(&self) -> Option<ReportWindow> {
        self.last_window
    }

    pub fn last_measure_names(&self) -> &[String] {
        &self.last_measure_names
    }
}

impl AnalyticsGateway for StubAnalyticsGateway {
    fn measures(
        &mut self,
        _app_id: &AppId,
        window: ReportWindow,
        measure_names: &[String],
    ) -> Result<Vec<MeasureSeries>, AnalyticsError> {
        self.last_window = Some(window);
        self.last_measure_names = measure_names.to_vec();
        Ok(self.measures.clone())
    }

    fn all_time(&mut self, _app_id: &AppId) -> Result<AllTimeSummary, AnalyticsError> {
        Ok(self.all_time.clone())
    }

    fn retention(
        &mut self,
        _app_id: &AppId,
        end_time: NaiveDate,
    ) -> Result<Vec<RetentionCohort>, AnalyticsError> {
        self.last_window = Some(ReportWindow::ending(end_time));
        Ok(self.retention.clone())
    }
}
