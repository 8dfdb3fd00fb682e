use std::io::Write;

use super::{csv_writer, ReportError};
use crate::domain::RetentionCohort;

/// One line per cohort: purchase date, absolute cohort size, then each
/// retention percentage with two decimals.
pub fn write_retention<W: Write>(
    cohorts: &[RetentionCohort],
    output: W,
) -> Result<(), ReportError> {
    let mut writer = csv_writer(output);

    for cohort in cohorts {
        let mut row = Vec::with_capacity(cohort.retention_percentages.len() + 2);
        row.push(cohort.purchase_date.format("%Y-%m-%d").to_string());
        row.push(cohort.initial_count.to_string());
        row.extend(
            cohort
                .retention_percentages
                .iter()
                .map(|percentage| format!("{:.2}", percentage)),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
