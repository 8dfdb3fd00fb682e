//! itc-analytics core library
//!
//! Contains domain types, report formatters and port definitions (traits) for
//! the analytics exporter. This crate has no knowledge of infrastructure concerns.

pub mod config;
pub mod domain;
pub mod ports;
pub mod report;

pub use config::{Config, ConfigError, EndpointConfig};
pub use domain::{
    AllTimeSummary, AnalyticsEndpoint, AppId, AppIdError, Credentials, Frequency, MeasureSeries,
    MetricValue, ReportWindow, RetentionCohort, Sample, ALL_TIME_MEASURES, DEFAULT_MEASURES,
};
pub use ports::{AnalyticsError, AnalyticsGateway, HttpRequest, HttpTransport, TransportError};
pub use report::ReportError;
