//! JSON file output: the three daily series keyed by metric name.

use std::fs;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::models::{DailyReports, Report};
use crate::output::write_atomic;

/// Serialize the report's series to a pretty-printed JSON string.
pub fn to_string(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report.series())?)
}

/// Write the series to `path` atomically.
pub fn write(report: &Report, path: &Path) -> Result<()> {
    let json = to_string(report)?;
    write_atomic(path, |out| {
        use std::io::Write;
        out.write_all(json.as_bytes())
            .and_then(|_| out.write_all(b"\n"))
            .map_err(|e| ReportError::io(path, e))
    })
}

/// Read a file written by [`write`] back into series.
pub fn read(path: &Path) -> Result<DailyReports> {
    let contents = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}
