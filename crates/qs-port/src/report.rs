//! CSV report backend.
//!
//! Creates two files in the configured output directory:
//! - `unit_completions.csv`
//! - `run_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use qs_engine::RunOutcome;

use crate::error::PortResult;
use crate::phase::InstallationReport;

/// Writes an [`InstallationReport`] to two CSV files.
pub struct ReportWriter {
    completions: Writer<File>,
    summary:     Writer<File>,
    finished:    bool,
}

impl ReportWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> PortResult<Self> {
        let mut completions = Writer::from_path(dir.join("unit_completions.csv"))?;
        completions.write_record(["stage", "unit", "completed_hours"])?;

        let mut summary = Writer::from_path(dir.join("run_summary.csv"))?;
        summary.write_record([
            "outcome",
            "elapsed_hours",
            "substructures",
            "turbines",
            "installed",
        ])?;

        Ok(Self {
            completions,
            summary,
            finished: false,
        })
    }

    /// Append every completion from `report`, one row per unit per stage.
    pub fn write_report(&mut self, report: &InstallationReport) -> PortResult<()> {
        for (stage, times) in [
            ("substructure", &report.substructure_completions),
            ("turbine", &report.turbine_completions),
            ("installation", &report.installations),
        ] {
            for (i, t) in times.iter().enumerate() {
                self.completions.write_record(&[
                    stage.to_string(),
                    (i + 1).to_string(),
                    t.get().to_string(),
                ])?;
            }
        }

        let outcome = match report.outcome {
            RunOutcome::Completed { .. } => "completed",
            RunOutcome::Deadlock { .. } => "deadlock",
            RunOutcome::HorizonReached { .. } => "horizon",
        };
        self.summary.write_record(&[
            outcome.to_string(),
            report.elapsed().get().to_string(),
            report.substructure_completions.len().to_string(),
            report.turbine_completions.len().to_string(),
            report.installations.len().to_string(),
        ])?;
        Ok(())
    }

    /// Flush both files.  Safe to call more than once.
    pub fn finish(&mut self) -> PortResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.completions.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
