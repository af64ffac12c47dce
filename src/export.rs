//! End-to-end exports: report in memory, defattr file on disk.
//!
//! Anything that can be decided without the operator (an empty target list,
//! a preset `--sequence` that names nothing) is checked before the output
//! file is opened, so those failures never truncate an existing file.

use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::common::AsrError;
use crate::defattr::{map_posteriors, site_records, write_defattr};
use crate::prompt::{create_output, resolve_selection, Prompter};
use crate::report::Report;
use crate::sequences::SequenceRecord;

/// How an export ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Export {
    /// The file was written with `records` lines for `target`.
    Written { target: String, records: usize },
    /// The operator refused to overwrite; nothing was touched.
    Declined,
}

/// Resolve a preset target. Errors when `choices` is empty or `sequence`
/// matches neither a display index nor a name.
pub fn preselect(choices: &[&SequenceRecord], sequence: &str) -> Result<usize, AsrError> {
    if choices.is_empty() {
        return Err(AsrError::NoSelectableSequences);
    }
    resolve_selection(choices, sequence).ok_or_else(|| AsrError::SequenceNotFound(sequence.to_string()))
}

/// Write the posteriors of one sequence of `report` to `output`.
///
/// With `sequence` the target is fixed up front, otherwise the operator is
/// asked after the output file has been opened.
pub fn export_defattr<R: BufRead, W: Write>(
    report: &Report,
    output: &Path,
    sequence: Option<&str>,
    force: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<Export, AsrError> {
    let choices = report.selectable_sequences();
    if choices.is_empty() {
        return Err(AsrError::NoSelectableSequences);
    }
    let preset = sequence.map(|s| preselect(&choices, s)).transpose()?;

    let Some(file) = create_output(output, force, prompter)? else {
        return Ok(Export::Declined);
    };
    let idx = match preset {
        Some(i) => i,
        None => prompter.select_sequence(&choices)?,
    };
    let target = choices[idx];
    info!("exporting posteriors of {} ({} residues)", target.name, target.len());

    let records = map_posteriors(target, &report.sites);
    write_defattr(BufWriter::new(file), &records)?;
    Ok(Export::Written { target: target.name.clone(), records: records.len() })
}

/// Write the top posterior of every site of `report` to `output`.
pub fn export_sites<R: BufRead, W: Write>(
    report: &Report,
    output: &Path,
    force: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<Export, AsrError> {
    let Some(file) = create_output(output, force, prompter)? else {
        return Ok(Export::Declined);
    };
    let records = site_records(&report.sites);
    write_defattr(BufWriter::new(file), &records)?;
    Ok(Export::Written { target: "sites".to_string(), records: records.len() })
}
