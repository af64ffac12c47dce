//! CLI for `asr list`.
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use asrtools::*;

#[derive(Debug, Args)]
pub struct ListCmd {
    /// Reconstruction report (text export of an ancestral node).
    #[arg(short, long, value_name="FILE")]
    pub input: PathBuf,
}

pub fn run(cmd: ListCmd) -> Result<()> {
    let text = fs::read_to_string(&cmd.input).with_context(|| format!("open input: {}", cmd.input.display()))?;
    let report = parse_report(&text);
    let choices = report.selectable_sequences();

    println!("alignment length: {}", report.alignment_length);
    println!("site records: {}", report.sites.len());
    println!("sequences: {} ({} pseudosequences hidden)", report.sequences.len(), report.sequences.len() - choices.len());
    for (i, rec) in choices.iter().enumerate() {
        println!("[{}] {}\t({} residues)", i + 1, rec.name, rec.len());
    }
    Ok(())
}
