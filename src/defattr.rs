//! Mapping posteriors onto a target sequence and writing `defattr` files.
//!
//! A defattr file assigns one value per residue. Molecular viewers read it
//! as an attribute named `posteriors`:
//!
//! ```text
//! attribute: posteriors
//! recipient: residues
//! 	:1	0.950
//! 	:2	0.810
//! ```
//!
//! Target residues are paired with site records by **parse order**. The i-th
//! residue is looked up in the i-th site record, whatever site number that
//! record carries. Mismatching site numbers are reported at `debug` level and
//! are not corrected.

use std::io::Write;

use log::{debug, warn};

use crate::common::{AsrError, DEFAULT_PROBABILITY};
use crate::report::PositionRecord;
use crate::sequences::SequenceRecord;

/// The two fixed header lines of every output file.
pub const HEADER: [&str; 2] = ["attribute: posteriors", "recipient: residues"];

/// One output line: residue number and probability text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputRecord {
    pub position: usize,
    pub probability: String,
}

/// Probability of each residue of `target`, numbered from 1.
///
/// Residues beyond the last site record get `0.000`.
pub fn map_posteriors(target: &SequenceRecord, sites: &[PositionRecord]) -> Vec<OutputRecord> {
    let mut out = Vec::with_capacity(target.len());
    let mut uncovered = 0usize;
    for (i, residue) in target.residues.chars().enumerate() {
        let position = i + 1;
        let probability = match sites.get(i) {
            Some(site) => {
                if site.site_index != position {
                    debug!("residue {} paired with site record #{} (report site {})", position, position, site.site_index);
                }
                site.probability_for(residue).unwrap_or(DEFAULT_PROBABILITY)
            }
            None => {
                uncovered += 1;
                DEFAULT_PROBABILITY
            }
        };
        debug!("AA# {} ({}): {}", position, residue, probability);
        out.push(OutputRecord { position, probability: probability.to_string() });
    }
    if uncovered > 0 {
        warn!(
            "sequence {} has {} residues but only {} site records; {} positions set to {}",
            target.name, target.len(), sites.len(), uncovered, DEFAULT_PROBABILITY
        );
    }
    out
}

/// Probability of the top candidate of each site, keyed by report site number.
pub fn site_records(sites: &[PositionRecord]) -> Vec<OutputRecord> {
    sites
        .iter()
        .map(|s| OutputRecord { position: s.site_index, probability: s.candidates[0].probability.clone() })
        .collect()
}

/// Write the header and one tab-delimited `\t:<position>\t<probability>` line per record.
pub fn write_defattr<W: Write>(mut out: W, records: &[OutputRecord]) -> Result<(), AsrError> {
    for line in HEADER {
        writeln!(out, "{}", line)?;
    }
    let mut w = csv::WriterBuilder::new().delimiter(b'\t').has_headers(false).from_writer(out);
    for r in records {
        let pos = format!(":{}", r.position);
        w.write_record(["", pos.as_str(), r.probability.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
