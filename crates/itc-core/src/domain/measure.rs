use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Number, Value};

pub const DEFAULT_MEASURES: [&str; 6] = [
    "pageViewCount",
    "units",
    "iap",
    "sales",
    "activeDevices",
    "sessions",
];

pub const ALL_TIME_MEASURES: [&str; 4] = ["pageViewCount", "units", "sales", "sessions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Month,
    Day,
}

/// Scalar metric value as delivered by the API.
///
/// Numbers keep their JSON representation so `5` stays `5` and `12.0`
/// stays `12.0` in the rendered report.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(Number),
    Text(String),
    Null,
}

impl MetricValue {
    /// Returns `None` for arrays and objects, which have no scalar rendering.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(MetricValue::Number(number)),
            Value::String(text) => Some(MetricValue::Text(text)),
            Value::Bool(flag) => Some(MetricValue::Text(flag.to_string())),
            Value::Null => Some(MetricValue::Null),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Number(Number::from(value))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(number) => write!(formatter, "{}", number),
            MetricValue::Text(text) => formatter.write_str(text),
            MetricValue::Null => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: MetricValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSeries {
    pub measure: String,
    pub samples: Vec<Sample>,
}

impl MeasureSeries {
    pub fn new(measure: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            measure: measure.into(),
            samples,
        }
    }

    pub fn value_on(&self, date: NaiveDate) -> Option<&MetricValue> {
        self.samples
            .iter()
            .rev()
            .find(|sample| sample.date == date)
            .map(|sample| &sample.value)
    }
}
