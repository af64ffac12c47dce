//! # asrtools
//!
//! Convert ancestral sequence reconstruction reports into `defattr` files.
//!
//! A reconstruction report lists, per alignment column, up to three candidate
//! residues with their posterior probabilities, followed by the reconstructed
//! sequences. This crate parses such a report and writes the posterior of each
//! residue of a chosen sequence as a two-column attribute file, ready to be
//! loaded onto a structure in a molecular viewer.
//!
//! The pipeline has three stages:
//! 1. [`parse_report`] reads the alignment length, the per-site candidates
//!    ([`PositionRecord`]) and the sequence blocks ([`SequenceRecord`]);
//! 2. [`selectable`] drops pseudosequences and a target is chosen, either
//!    interactively through a [`Prompter`] or with [`resolve_selection`];
//! 3. [`map_posteriors`] pairs residues with sites and [`write_defattr`]
//!    writes the file.
//!
//! [`export_defattr`] runs stages 2 and 3 against a file on disk.
//!
//! ### Example
//! ```
//! use asrtools::{parse_report, map_posteriors, write_defattr};
//! let text = "alignlen: 1\nSITE:      1A C G 0.950  0.030  0.020\n>anc\nA\n";
//! let report = parse_report(text);
//! let target = report.selectable_sequences()[0];
//! let records = map_posteriors(target, &report.sites);
//! let mut out: Vec<u8> = Vec::new();
//! write_defattr(&mut out, &records).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(),
//!            "attribute: posteriors\nrecipient: residues\n\t:1\t0.950\n");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod common;
pub mod defattr;
pub mod export;
pub mod prompt;
pub mod report;
pub mod sequences;

pub use common::*;
pub use defattr::*;
pub use export::*;
pub use prompt::*;
pub use report::*;
pub use sequences::*;
