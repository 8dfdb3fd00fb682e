use std::io::Write;

use super::{csv_writer, ReportError};
use crate::domain::AllTimeSummary;

/// Header row of metric names and one row of values, built from a single
/// pass over the summary so both rows share the same order.
pub fn write_all_time<W: Write>(summary: &AllTimeSummary, output: W) -> Result<(), ReportError> {
    let mut header = Vec::with_capacity(summary.len());
    let mut values = Vec::with_capacity(summary.len());

    for (metric, value) in summary.entries() {
        header.push(metric.to_string());
        values.push(value.to_string());
    }

    let mut writer = csv_writer(output);
    writer.write_record(&header)?;
    writer.write_record(&values)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetricValue;
    use crate::report::render;
    use serde_json::json;

    fn summary(entries: Vec<(&str, serde_json::Value)>) -> AllTimeSummary {
        AllTimeSummary::new(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), MetricValue::from_json(value).unwrap()))
                .collect(),
        )
    }

    #[test]
    fn writes_header_and_values_in_same_order() {
        let summary = summary(vec![("units", json!(5)), ("sales", json!(12.5))]);

        let output = render(|buffer| write_all_time(&summary, buffer));

        assert_eq!(output, "units,sales\n5,12.5\n");
    }

    #[test]
    fn follows_server_order_not_alphabetical() {
        let summary = summary(vec![
            ("sessions", json!(10)),
            ("pageViewCount", json!(400)),
            ("units", json!(3)),
        ]);

        let output = render(|buffer| write_all_time(&summary, buffer));

        assert_eq!(output, "sessions,pageViewCount,units\n10,400,3\n");
    }

    #[test]
    fn null_value_renders_empty_cell() {
        let summary = summary(vec![("units", json!(5)), ("sales", json!(null))]);

        let output = render(|buffer| write_all_time(&summary, buffer));

        assert_eq!(output, "units,sales\n5,\n");
    }
}
