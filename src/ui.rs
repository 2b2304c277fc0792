//! Terminal feedback.
//!
//! Cipher output owns standard output, so everything here goes to standard
//! error.

use std::path::Path;

use anyhow::Result;
use console::{Term, style};

use crate::config::APP_NAME;
use crate::types::{Mode, Summary};

/// Reports a completed run whose output went to a file.
pub fn show_success(mode: Mode, summary: Summary, output: &Path) -> Result<()> {
    let term = Term::stderr();
    term.write_line(&format!(
        "{} {} {} {} characters into {}",
        style("✓").green(),
        style(APP_NAME).bold(),
        mode.done_label(),
        summary.read,
        style(output.display()).cyan()
    ))?;
    term.write_line(&format!("  {} characters written", summary.written))?;
    Ok(())
}
