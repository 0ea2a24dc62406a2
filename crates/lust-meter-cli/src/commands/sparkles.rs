//! Sparkles command - print the decorative overlay layout.

use anyhow::Result;
use lust_meter_core::{DecorativeOverlay, ResultOutput};

use crate::output::JsonOutput;

/// Run the sparkles command.
pub fn run() -> Result<()> {
    let output = JsonOutput::stdout();
    for marker in DecorativeOverlay.markers() {
        output.write_line(&marker)?;
    }
    output.flush()
}
