//! JSON output adapter.

use anyhow::Result;
use lust_meter_core::{PredictionReport, ResultOutput};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// How reports reach the writer.
enum Layout {
    /// One JSON object per report, written immediately.
    Lines,
    /// Reports are collected and written as one array on flush.
    Array {
        pretty: bool,
        pending: Mutex<Vec<PredictionReport>>,
    },
}

/// JSON Lines or JSON array output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    layout: Layout,
}

impl JsonOutput {
    /// Creates a new JSON Lines output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON array output writing to stdout.
    #[must_use]
    pub fn stdout_array(pretty: bool) -> Self {
        Self::array(Box::new(io::stdout()), pretty)
    }

    /// Creates a new JSON Lines output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout: Layout::Lines,
        }
    }

    /// Creates a new JSON array output writing to the given writer.
    #[must_use]
    pub fn array(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout: Layout::Array {
                pretty,
                pending: Mutex::new(Vec::new()),
            },
        }
    }

    /// Writes a batch of reports as a JSON array.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_array(&self, reports: &[PredictionReport], pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(reports)?
        } else {
            serde_json::to_string(reports)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    /// Writes any serializable value as a single JSON line.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_line<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, report: &PredictionReport) -> Result<()> {
        match &self.layout {
            Layout::Lines => self.write_line(report),
            Layout::Array { pending, .. } => {
                pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(report.clone());
                Ok(())
            }
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        if let Layout::Array { pretty, pending } = &self.layout {
            let reports =
                std::mem::take(&mut *pending.lock().unwrap_or_else(PoisonError::into_inner));
            self.write_array(&reports, *pretty)?;
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}
