use std::io::Write;

use anyhow::{Context, Result};
use itc_core::report::write_measures;
use itc_core::{AnalyticsGateway, AppId, ReportWindow};
use tracing::debug;

pub fn execute<G, W>(
    gateway: &mut G,
    app_id: &AppId,
    window: ReportWindow,
    measure_names: &[String],
    output: W,
) -> Result<()>
where
    G: AnalyticsGateway,
    W: Write,
{
    let series = gateway
        .measures(app_id, window, measure_names)
        .context("failed to fetch measures")?;

    debug!(%app_id, series = series.len(), "measures fetched");

    write_measures(&series, output).context("failed to write measures report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use itc_adapters::{FailingAnalyticsGateway, StubAnalyticsGateway};
    use itc_core::{AnalyticsError, MeasureSeries, MetricValue, Sample};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 4, day).unwrap()
    }

    fn sample(day: u32, value: i64) -> Sample {
        Sample {
            date: date(day),
            value: MetricValue::from(value),
        }
    }

    #[test]
    fn writes_one_row_per_date_with_gaps_left_empty() {
        let mut gateway = StubAnalyticsGateway::new().with_measures(vec![
            MeasureSeries::new("sales", vec![sample(1, 10), sample(2, 20)]),
            MeasureSeries::new("sessions", vec![sample(1, 3)]),
        ]);
        let names = vec!["sales".to_string(), "sessions".to_string()];
        let mut output = Vec::new();

        execute(
            &mut gateway,
            &AppId::parse("12345").unwrap(),
            ReportWindow::ending(date(29)),
            &names,
            &mut output,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "date,sales,sessions\n2015-04-01,10,3\n2015-04-02,20,\n"
        );
    }

    #[test]
    fn passes_window_and_measure_names_to_gateway() {
        let mut gateway = StubAnalyticsGateway::new();
        let names = vec!["units".to_string()];
        let window = ReportWindow::between(date(1), date(29));

        execute(
            &mut gateway,
            &AppId::parse("12345").unwrap(),
            window,
            &names,
            Vec::new(),
        )
        .unwrap();

        assert_eq!(gateway.last_window(), Some(window));
        assert_eq!(gateway.last_measure_names(), names.as_slice());
    }

    #[test]
    fn authentication_failure_keeps_its_message() {
        let mut gateway = FailingAnalyticsGateway::authentication_error();
        let mut output = Vec::new();

        let error = execute(
            &mut gateway,
            &AppId::parse("12345").unwrap(),
            ReportWindow::ending(date(29)),
            &["units".to_string()],
            &mut output,
        )
        .unwrap_err();

        assert_eq!(
            error.downcast_ref::<AnalyticsError>(),
            Some(&AnalyticsError::Authentication)
        );
        assert!(format!("{:#}", error).contains("User or password incorrect."));
        assert!(output.is_empty());
    }
}
