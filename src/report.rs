//! Parser for ancestral reconstruction reports.
//!
//! A report is line-oriented text. Three kinds of lines matter:
//!
//! ```text
//! alignlen: 3
//! SITE:      1A C G 0.950  0.030  0.020
//! SITE:      2K R Q 0.810  0.120  0.040
//! >node_12
//! AK
//! ```
//!
//! - an **alignment length** line holding `alignlen:` and an integer;
//! - **site** lines with `SITE:` near the start and fixed-column fields
//!   (site number, three residues, three posterior probabilities);
//! - FASTA-like **sequence blocks**, handed to [`SequenceExtractor`].
//!
//! The scan is a single pass. Lines are tested in the order above and the first
//! rule that applies claims the line. Bad fields never abort the scan: a site
//! line whose number cannot be read is skipped, and a missing residue or
//! probability falls back to `X` / `0.000`. Both cases are logged at `warn`.
//!
//! ### Example
//! ```rust
//! use asrtools::{parse_report, AlignmentLength};
//! let text = "alignlen: 1\nSITE:      1A C G 0.950  0.030  0.020\n>anc\nA\n";
//! let report = parse_report(text);
//! assert_eq!(report.alignment_length, AlignmentLength::Declared { length: 1, line: 1 });
//! assert_eq!(report.sites[0].candidates[0].probability, "0.950");
//! assert_eq!(report.sequences[0].residues, "A");
//! ```

use std::fmt;

use log::{debug, warn};

use crate::common::{DEFAULT_PROBABILITY, DEFAULT_RESIDUE};
use crate::sequences::{selectable, SequenceExtractor, SequenceRecord};

/// Character columns of the fixed-width site table. Offsets are 0-based and
/// ranges are end-exclusive.
#[derive(Clone, Debug)]
pub struct ReportLayout {
    /// Marker of the alignment length line.
    pub length_marker: &'static str,
    /// Marker of a site line.
    pub site_marker: &'static str,
    /// The site marker must start within this many leading characters.
    pub site_marker_window: usize,
    /// Columns of the site number.
    pub site_index: (usize, usize),
    /// Column of each candidate residue.
    pub residues: [usize; 3],
    /// Columns of each candidate probability.
    pub probabilities: [(usize, usize); 3],
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            length_marker: "alignlen:",
            site_marker: "SITE:",
            site_marker_window: 10,
            site_index: (6, 12),
            residues: [12, 14, 16],
            probabilities: [(18, 23), (25, 30), (32, 37)],
        }
    }
}

/// Declared alignment length, with the 1-based line it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignmentLength {
    /// No `alignlen:` line was seen.
    Missing,
    /// The last `alignlen:` line seen could not be parsed.
    Unparsed { line: usize },
    /// First successfully parsed value.
    Declared { length: usize, line: usize },
}

impl AlignmentLength {
    pub fn value(&self) -> Option<usize> {
        match self {
            AlignmentLength::Declared { length, .. } => Some(*length),
            _ => None,
        }
    }
}

impl fmt::Display for AlignmentLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentLength::Missing => write!(f, "not found in input"),
            AlignmentLength::Unparsed { line } => write!(f, "found at line {} but could not be parsed", line),
            AlignmentLength::Declared { length, line } => write!(f, "{} (line {})", length, line),
        }
    }
}

/// One candidate residue and its posterior probability, kept as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub residue: char,
    pub probability: String,
}

impl Default for Candidate {
    fn default() -> Self {
        Self { residue: DEFAULT_RESIDUE, probability: DEFAULT_PROBABILITY.to_string() }
    }
}

/// Posterior data for one alignment column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionRecord {
    /// Site number as printed in the report (1-based).
    pub site_index: usize,
    /// Candidates in report order (descending probability).
    pub candidates: [Candidate; 3],
}

impl PositionRecord {
    /// Probability of the first candidate whose residue equals `residue`.
    pub fn probability_for(&self, residue: char) -> Option<&str> {
        self.candidates.iter().find(|c| c.residue == residue).map(|c| c.probability.as_str())
    }
}

impl fmt::Display for PositionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site {}:", self.site_index)?;
        for c in &self.candidates {
            write!(f, " {}={}", c.residue, c.probability)?;
        }
        Ok(())
    }
}

/// Everything one scan of a report yields.
#[derive(Clone, Debug)]
pub struct Report {
    pub alignment_length: AlignmentLength,
    /// Site records in file order.
    pub sites: Vec<PositionRecord>,
    /// All sequence blocks, pseudosequences included.
    pub sequences: Vec<SequenceRecord>,
}

impl Report {
    /// Sequences that may be chosen as export targets.
    pub fn selectable_sequences(&self) -> Vec<&SequenceRecord> {
        selectable(&self.sequences)
    }

    /// Log what the scan found once an export is done.
    pub fn log_summary(&self) {
        debug!("alignlen: {}", self.alignment_length);
        debug!("total sites and posterior probabilities parsed: {}", self.sites.len());
        if let Some(n) = self.alignment_length.value() {
            if n != self.sites.len() {
                warn!("declared alignment length {} differs from {} parsed site records", n, self.sites.len());
            }
        }
    }
}

/// Parse a report with the standard column layout.
pub fn parse_report(text: &str) -> Report {
    parse_report_with(text, &ReportLayout::default())
}

/// Parse a report with an explicit column layout.
pub fn parse_report_with(text: &str, layout: &ReportLayout) -> Report {
    let mut alignment_length = AlignmentLength::Missing;
    let mut sites: Vec<PositionRecord> = Vec::new();
    let mut extractor = SequenceExtractor::new();

    for (i, line) in text.lines().enumerate() {
        let lineno = i + 1;
        if alignment_length.value().is_none() && line.contains(layout.length_marker) {
            debug!("found alignment length at line {}", lineno);
            alignment_length = parse_alignment_length(line, layout, lineno);
        } else if char_slice(line, 0, layout.site_marker_window).contains(layout.site_marker) {
            debug!("found posterior probability data at line {}", lineno);
            if let Some(rec) = parse_site(line, layout, lineno) {
                debug!("line {}: entry #{} {}", lineno, sites.len() + 1, rec);
                sites.push(rec);
            }
        } else {
            extractor.feed(line);
        }
    }

    Report { alignment_length, sites, sequences: extractor.finish() }
}

fn parse_alignment_length(line: &str, layout: &ReportLayout, lineno: usize) -> AlignmentLength {
    let tail = line.find(layout.length_marker).map_or("", |p| &line[p + layout.length_marker.len()..]);
    match tail.trim().parse::<usize>() {
        Ok(length) => {
            debug!("parsed alignment length: {}", length);
            AlignmentLength::Declared { length, line: lineno }
        }
        Err(e) => {
            warn!("error parsing the alignlen value at line {}: {}", lineno, e);
            AlignmentLength::Unparsed { line: lineno }
        }
    }
}

fn parse_site(line: &str, layout: &ReportLayout, lineno: usize) -> Option<PositionRecord> {
    let (a, b) = layout.site_index;
    let site_index = match char_slice(line, a, b).trim().parse::<usize>() {
        Ok(n) => n,
        Err(e) => {
            warn!("error parsing site number at line {}, skipping line: {}", lineno, e);
            return None;
        }
    };

    let mut candidates: [Candidate; 3] = Default::default();
    let mut defaulted = Vec::new();
    for (k, cand) in candidates.iter_mut().enumerate() {
        let col = layout.residues[k];
        match char_slice(line, col, col + 1).chars().next() {
            Some(r) if !r.is_whitespace() => cand.residue = r,
            _ => defaulted.push(format!("residue {}", k + 1)),
        }
        let (s, e) = layout.probabilities[k];
        let p = char_slice(line, s, e).trim();
        if is_fixed_point(p) {
            cand.probability = p.to_string();
        } else {
            defaulted.push(format!("probability {}", k + 1));
        }
    }
    if !defaulted.is_empty() {
        warn!(
            "error parsing posterior data at line {} (site #{}): default values used for {}",
            lineno, site_index, defaulted.join(", ")
        );
    }
    Some(PositionRecord { site_index, candidates })
}

/// Plain decimal text: digits with at most one `.`.
fn is_fixed_point(p: &str) -> bool {
    p.chars().any(|c| c.is_ascii_digit())
        && p.chars().all(|c| c.is_ascii_digit() || c == '.')
        && p.matches('.').count() <= 1
}

/// Characters `start..end` of `line`, clipped to the line length.
fn char_slice(line: &str, start: usize, end: usize) -> &str {
    let at = |n: usize| line.char_indices().nth(n).map_or(line.len(), |(i, _)| i);
    let (s, e) = (at(start), at(end.max(start)));
    &line[s..e]
}
