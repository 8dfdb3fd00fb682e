use std::io::Write;

use anyhow::{Context, Result};
use itc_core::report::write_all_time;
use itc_core::{AnalyticsGateway, AppId};
use tracing::debug;

pub fn execute<G, W>(gateway: &mut G, app_id: &AppId, output: W) -> Result<()>
where
    G: AnalyticsGateway,
    W: Write,
{
    let summary = gateway
        .all_time(app_id)
        .context("failed to fetch all-time summary")?;

    debug!(%app_id, metrics = summary.len(), "all-time summary fetched");

    write_all_time(&summary, output).context("failed to write all-time report")
}
