use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use itc_core::report::write_retention;
use itc_core::{AnalyticsGateway, AppId};
use tracing::debug;

pub fn execute<G, W>(gateway: &mut G, app_id: &AppId, end_date: NaiveDate, output: W) -> Result<()>
where
    G: AnalyticsGateway,
    W: Write,
{
    let cohorts = gateway
        .retention(app_id, end_date)
        .context("failed to fetch retention cohorts")?;

    debug!(%app_id, cohorts = cohorts.len(), "retention fetched");

    write_retention(&cohorts, output).context("failed to write retention report")
}
