//! Sequence blocks embedded in a reconstruction report.
//!
//! Reports carry FASTA-like blocks after the per-site table: a `>` line gives
//! the record name and the following purely alphabetic lines hold residues.
//! Any other line closes the block; residue lines after that are ignored until
//! the next `>` line.
//!
//! The reconstruction tool also writes auxiliary pseudosequences (a gap mask
//! and a significance track). They are kept by the extractor and only removed
//! by [`selectable`].
//!
//! ### Example
//! ```rust
//! use asrtools::{SequenceExtractor, selectable};
//! let mut ex = SequenceExtractor::new();
//! for line in ">node1\nMKV\nLA\n>sigs\n***\n".lines() { ex.feed(line); }
//! let recs = ex.finish();
//! assert_eq!(recs[0].residues, "MKVLA");
//! assert_eq!(selectable(&recs).len(), 1);
//! ```

/// Name fragment of the gap-mask pseudosequence.
pub const GAP_MASK_MARKER: &str = "smp_gaps";
/// Exact name of the significance pseudosequence.
pub const SIGNIFICANCE_NAME: &str = "sigs";

/// A named sequence found in the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Text after `>`, trimmed.
    pub name: String,
    /// Residues in report order, exactly as written (case preserved).
    pub residues: String,
}

impl SequenceRecord {
    /// Number of residues.
    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// Line-fed accumulator for sequence blocks.
#[derive(Debug, Default)]
pub struct SequenceExtractor {
    records: Vec<SequenceRecord>,
    in_block: bool,
}

impl SequenceExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one line to the extractor.
    pub fn feed(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix('>') {
            self.records.push(SequenceRecord { name: rest.trim().to_string(), residues: String::new() });
            self.in_block = true;
            return;
        }
        if !self.in_block { return; }
        let t = line.trim();
        if is_residue_line(t) {
            if let Some(rec) = self.records.last_mut() {
                rec.residues.push_str(t);
            }
        } else {
            self.in_block = false;
        }
    }

    /// All records in file order, pseudosequences included.
    pub fn finish(self) -> Vec<SequenceRecord> {
        self.records
    }
}

fn is_residue_line(t: &str) -> bool {
    !t.is_empty() && t.chars().all(char::is_alphabetic)
}

/// True for the gap-mask and significance tracks the reconstruction tool
/// writes next to real sequences.
pub fn is_pseudosequence(name: &str) -> bool {
    name.contains(GAP_MASK_MARKER) || name == SIGNIFICANCE_NAME
}

/// Records that may be chosen as export targets, in file order.
pub fn selectable(records: &[SequenceRecord]) -> Vec<&SequenceRecord> {
    records.iter().filter(|r| !is_pseudosequence(&r.name)).collect()
}
