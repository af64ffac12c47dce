//! Shared pieces: the crate error type and the placeholder values used when a
//! report field cannot be read.
//!
//! Per-line problems in a report (bad site number, short record, unparsable
//! alignment length) are **not** errors. They are logged as warnings by the
//! parser and the line is skipped or defaulted. [`AsrError`] only covers
//! conditions that stop a run.

/// Residue symbol used when a candidate residue column is missing.
pub const DEFAULT_RESIDUE: char = 'X';

/// Probability text used when a candidate probability is missing or when a
/// residue matches none of the candidates at its site.
pub const DEFAULT_PROBABILITY: &str = "0.000";

/// Errors that can be returned by the library.
#[derive(thiserror::Error, Debug)]
pub enum AsrError {
    /// Reading the report, writing the output, or talking to the console failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Writing a tab-delimited record failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// The report holds no sequence that may be chosen as a target.
    #[error("no selectable sequences in report (only pseudosequences or none at all)")]
    NoSelectableSequences,
    /// A preselected target matched neither a display index nor a name.
    #[error("sequence name or index not found: {0}")]
    SequenceNotFound(String),
    /// The console input ended before a valid answer was given.
    #[error("input closed while waiting for {0}")]
    PromptClosed(&'static str),
}
