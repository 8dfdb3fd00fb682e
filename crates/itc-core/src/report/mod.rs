//! CSV rendering of the three analytics reports.

mod all_time;
mod measures;
mod retention;

use std::io::Write;

use thiserror::Error;

pub use all_time::write_all_time;
pub use measures::{write_measures, GAP_VALUE};
pub use retention::write_retention;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write CSV record: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("failed to flush report output: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

fn csv_writer<W: Write>(output: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(output)
}

#[cfg(test)]
fn render<F>(write: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), ReportError>,
{
    let mut output = Vec::new();
    write(&mut output).unwrap();
    String::from_utf8(output).unwrap()
}
