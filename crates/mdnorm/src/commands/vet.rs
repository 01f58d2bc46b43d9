//! `mdnorm vet` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use mdnorm_vet::Fault;
use rayon::prelude::*;
use serde::Serialize;

use super::Status;
use crate::error::CliError;
use crate::input::{self, Source};
use crate::output::Output;

/// Report format for faults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// One `file:row:col` line per fault, 1-based row and byte column.
    #[default]
    Text,
    /// JSON array of fault records.
    Json,
}

/// Arguments for the vet command.
#[derive(Args)]
pub(crate) struct VetArgs {
    /// Markdown files to check (default: read stdin).
    files: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

/// A fault together with the document it was found in.
#[derive(Serialize)]
struct FileFault<'a> {
    file: String,
    #[serde(flatten)]
    fault: &'a Fault,
}

impl VetArgs {
    /// Execute the vet command.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be read or the report cannot be
    /// written.
    pub(crate) fn execute(self) -> Result<Status, CliError> {
        let output = Output::new();

        let sources = input::read_all(&self.files)?;
        let reports = vet_all(&sources);

        let mut stdout = std::io::stdout().lock();
        match self.format {
            ReportFormat::Text => write_text(&mut stdout, &sources, &reports)?,
            ReportFormat::Json => write_json(&mut stdout, &sources, &reports)?,
        }
        stdout.flush()?;

        let total: usize = reports.iter().map(Vec::len).sum();
        if total == 0 {
            output.success("No faults found");
            return Ok(Status::Clean);
        }
        let files = reports.iter().filter(|faults| !faults.is_empty()).count();
        output.warning(&format!("{total} fault(s) found in {files} file(s)"));
        Ok(Status::Faults)
    }
}

/// Scan every source in parallel. Reports come back in source order.
fn vet_all(sources: &[Source]) -> Vec<Vec<Fault>> {
    sources
        .par_iter()
        .map(|source| {
            let faults = mdnorm_vet::vet(&source.bytes);
            tracing::debug!(name = %source.name(), faults = faults.len(), "Vetted document");
            faults
        })
        .collect()
}

fn write_text(
    out: &mut impl Write,
    sources: &[Source],
    reports: &[Vec<Fault>],
) -> Result<(), CliError> {
    for (source, faults) in sources.iter().zip(reports) {
        let name = source.name();
        for fault in faults {
            writeln!(
                out,
                "{name}:{}:{} offset={} reason={} {:?}",
                fault.row, fault.column, fault.offset, fault.reason, fault.line
            )?;
        }
    }
    Ok(())
}

fn write_json(
    out: &mut impl Write,
    sources: &[Source],
    reports: &[Vec<Fault>],
) -> Result<(), CliError> {
    let records: Vec<FileFault<'_>> = sources
        .iter()
        .zip(reports)
        .flat_map(|(source, faults)| {
            let file = source.name();
            faults.iter().map(move |fault| FileFault {
                file: file.clone(),
                fault,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}
