//! Atomic file output and the selection of outputs for a run.
//!
//! Every file is first written to a temporary file next to its destination
//! and renamed into place only after the whole content was written, so an
//! interrupted or failed render never leaves a truncated file behind.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::models::Report;
use crate::render;

/// Write `path` atomically, letting `write` fill the content.
///
/// The temporary file is deleted if `write` or the final rename fails.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut std::fs::File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ReportError::io(path, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| ReportError::io(path, e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| ReportError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| ReportError::io(path, e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// OutputPlan
// ---------------------------------------------------------------------------

/// Which outputs a run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPlan {
    /// Print the text report to standard output.
    pub console: bool,
    pub json: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
}

impl OutputPlan {
    /// Produce every requested output in order: console, JSON, PDF.
    ///
    /// A failing file output does not stop the ones after it; outputs that
    /// were already written stay. The first failure is returned.
    pub fn write(&self, report: &Report) -> Result<()> {
        let mut first_error: Option<ReportError> = None;

        if self.console {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            if let Err(e) = render::console::write(report, &mut lock) {
                record(&mut first_error, ReportError::io("<stdout>", e));
            }
        }

        if let Some(path) = &self.json {
            match render::json::write(report, path) {
                Ok(()) => info!(path = %path.display(), "Reports saved"),
                Err(e) => record(&mut first_error, e),
            }
        }

        if let Some(path) = &self.pdf {
            match render::pdf::write(report, path) {
                Ok(()) => info!(path = %path.display(), "PDF report generated"),
                Err(e) => record(&mut first_error, e),
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn record(slot: &mut Option<ReportError>, error: ReportError) {
    warn!("output failed: {}", error);
    if slot.is_none() {
        *slot = Some(error);
    }
}
