use chrono::NaiveDate;

/// Users who first purchased on `purchase_date`, followed over the
/// subsequent periods as a percentage of `initial_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionCohort {
    pub purchase_date: NaiveDate,
    pub initial_count: i64,
    pub retention_percentages: Vec<f64>,
}
