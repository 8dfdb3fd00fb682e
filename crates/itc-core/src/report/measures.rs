use std::collections::BTreeSet;
use std::io::Write;

use chrono::NaiveDate;

use super::{csv_writer, ReportError};
use crate::domain::MeasureSeries;

/// Cell written when a series has no sample for a date another series has.
///
/// A sample the server sent as `null` renders to the same empty cell, so the
/// CSV does not distinguish "no sample" from "null sample".
pub const GAP_VALUE: &str = "";

/// One row per distinct date across all series, ascending. Columns follow
/// the order of `series`.
pub fn write_measures<W: Write>(series: &[MeasureSeries], output: W) -> Result<(), ReportError> {
    let mut writer = csv_writer(output);

    let mut header = Vec::with_capacity(series.len() + 1);
    header.push("date".to_string());
    header.extend(series.iter().map(|measure| measure.measure.clone()));
    writer.write_record(&header)?;

    for date in date_union(series) {
        let mut row = Vec::with_capacity(series.len() + 1);
        row.push(date.format("%Y-%m-%d").to_string());
        row.extend(series.iter().map(|measure| {
            measure
                .value_on(date)
                .map(|value| value.to_string())
                .unwrap_or_else(|| GAP_VALUE.to_string())
        }));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

fn date_union(series: &[MeasureSeries]) -> BTreeSet<NaiveDate> {
    series
        .iter()
        .flat_map(|measure| measure.samples.iter().map(|sample| sample.date))
        .collect()
}
