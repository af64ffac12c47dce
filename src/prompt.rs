//! Console interaction: overwrite confirmation and target selection.
//!
//! [`Prompter`] is generic over its input and output so runs can be driven
//! from memory in tests:
//!
//! ```rust
//! use std::io::Cursor;
//! use asrtools::{Prompter, SequenceRecord};
//! let recs = [SequenceRecord { name: "anc".into(), residues: "MK".into() }];
//! let choices: Vec<&SequenceRecord> = recs.iter().collect();
//! let mut out: Vec<u8> = Vec::new();
//! let mut p = Prompter::new(Cursor::new("7\nanc\n"), &mut out);
//! assert_eq!(p.select_sequence(&choices).unwrap(), 0);
//! ```

use std::fs::File;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

use log::{debug, info};

use crate::common::AsrError;
use crate::sequences::SequenceRecord;

const SELECT_QUESTION: &str =
    "Please input the sequence name or index (in brackets) to generate and export posterior probabilities: ";
const OVERWRITE_AGAIN: &str =
    "Do you really want to overwrite? Type Y (not y) to overwrite, type anything else to exit. (Y/n) ";

/// Question/answer loop over a line reader and a writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process console.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one line. `None` once input is exhausted.
    fn ask(&mut self, question: &str) -> Result<Option<String>, AsrError> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Ask before replacing `path`. Only an exact `Y` confirms; `y` or an
    /// empty answer asks again, anything else (or end of input) refuses.
    pub fn confirm_overwrite(&mut self, path: &Path) -> Result<bool, AsrError> {
        let first = format!("Output file \"{}\" exists. Do you want to overwrite? (Y/n) ", path.display());
        let mut answer = self.ask(&first)?;
        loop {
            match answer.as_deref() {
                Some("Y") => return Ok(true),
                Some("y") | Some("") => answer = self.ask(OVERWRITE_AGAIN)?,
                _ => return Ok(false),
            }
        }
    }

    /// List `choices` and ask until the answer names one of them. Returns
    /// the index into `choices`.
    pub fn select_sequence(&mut self, choices: &[&SequenceRecord]) -> Result<usize, AsrError> {
        if choices.is_empty() {
            return Err(AsrError::NoSelectableSequences);
        }
        write_choices(&mut self.output, choices)?;
        loop {
            let Some(answer) = self.ask(SELECT_QUESTION)? else {
                return Err(AsrError::PromptClosed("sequence selection"));
            };
            match resolve_selection(choices, &answer) {
                Some(i) => {
                    debug!("selected [{}] {}", i + 1, choices[i].name);
                    return Ok(i);
                }
                None => writeln!(self.output, "Invalid input: sequence name or index not found.")?,
            }
        }
    }
}

/// Create (or truncate) the output file. An existing file is only replaced
/// when `force` is set or the operator confirms; a refusal yields `Ok(None)`.
pub fn create_output<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<File>, AsrError> {
    if path.exists() && !force && !prompter.confirm_overwrite(path)? {
        info!("output file overwriting denied, terminating");
        return Ok(None);
    }
    debug!("output file name is {}", path.display());
    Ok(Some(File::create(path)?))
}

/// Print `[n] name` for each choice, numbered from 1.
pub fn write_choices<W: Write>(mut out: W, choices: &[&SequenceRecord]) -> io::Result<()> {
    for (i, rec) in choices.iter().enumerate() {
        writeln!(out, "[{}] {}", i + 1, rec.name)?;
        debug!("{}", rec.residues);
    }
    Ok(())
}

/// Resolve an answer to an index into `choices`.
///
/// Anything that parses as an integer is a 1-based display index, otherwise
/// the answer must equal a name exactly. Surrounding whitespace is ignored.
pub fn resolve_selection(choices: &[&SequenceRecord], answer: &str) -> Option<usize> {
    let a = answer.trim();
    if let Ok(n) = a.parse::<usize>() {
        return (1..=choices.len()).contains(&n).then(|| n - 1);
    }
    choices.iter().position(|r| r.name == a)
}
