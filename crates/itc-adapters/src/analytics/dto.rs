use itc_core::domain::parse_report_date;
use itc_core::{
    AllTimeSummary, AppId, Frequency, MeasureSeries, MetricValue, ReportWindow, RetentionCohort,
    Sample,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MeasuresRequest {
    pub adam_id: Vec<String>,
    pub frequency: Frequency,
    pub measures: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: String,
}

impl MeasuresRequest {
    pub fn new(app_id: &AppId, window: ReportWindow, measures: &[String]) -> Self {
        Self {
            adam_id: vec![app_id.to_string()],
            frequency: Frequency::Month,
            measures: measures.to_vec(),
            start_time: window.api_start_time(),
            end_time: window.api_end_time(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeRequest {
    pub adam_id: Vec<String>,
    pub measures: Vec<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRequest {
    pub adam_id: Vec<String>,
    pub frequency: Frequency,
    pub end_time: String,
    pub dimension_filters: Vec<Value>,
}

#[derive(Deserialize, Debug)]
pub struct MeasuresResponse {
    pub results: Vec<MeasureResult>,
}

#[derive(Deserialize, Debug)]
pub struct MeasureResult {
    pub measure: String,
    #[serde(default)]
    pub data: Vec<MeasureDatum>,
}

#[derive(Deserialize, Debug)]
pub struct MeasureDatum {
    pub date: String,
    #[serde(default)]
    pub value: Value,
}

impl MeasureResult {
    pub fn into_series(self) -> Result<MeasureSeries, String> {
        let measure = self.measure;
        let samples = self
            .data
            .into_iter()
            .map(|datum| -> Result<Sample, String> {
                let date = parse_date(&datum.date)?;
                let value = MetricValue::from_json(datum.value).ok_or_else(|| {
                    format!("measure {} has a non-scalar value on {}", measure, datum.date)
                })?;
                Ok(Sample { date, value })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MeasureSeries { measure, samples })
    }
}

#[derive(Deserialize, Debug)]
pub struct AllTimeResponse {
    pub data: Map<String, Value>,
}

impl AllTimeResponse {
    pub fn into_summary(self) -> Result<AllTimeSummary, String> {
        let entries = self
            .data
            .into_iter()
            .map(|(metric, value)| match MetricValue::from_json(value) {
                Some(value) => Ok((metric, value)),
                None => Err(format!("metric {} has a non-scalar value", metric)),
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(AllTimeSummary::new(entries))
    }
}

#[derive(Deserialize, Debug)]
pub struct RetentionResponse {
    pub results: Vec<RetentionResult>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RetentionResult {
    pub app_purchase: String,
    pub data: Vec<RetentionDatum>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RetentionDatum {
    pub value: Option<f64>,
    pub retention_percentage: Option<f64>,
}

impl RetentionResult {
    pub fn into_cohort(self) -> Result<RetentionCohort, String> {
        let purchase_date = parse_date(&self.app_purchase)?;
        let mut data = self.data.into_iter();

        let initial_count = data
            .next()
            .and_then(|first| first.value)
            .ok_or_else(|| format!("cohort {} has no initial value", self.app_purchase))?;

        let retention_percentages = data
            .enumerate()
            .map(|(index, datum)| {
                datum.retention_percentage.ok_or_else(|| {
                    format!(
                        "cohort {} is missing retentionPercentage at position {}",
                        self.app_purchase,
                        index + 1
                    )
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(RetentionCohort {
            purchase_date,
            initial_count: initial_count.trunc() as i64,
            retention_percentages,
        })
    }
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate, String> {
    parse_report_date(raw).ok_or_else(|| format!("unrecognized date {}", raw))
}
