//! CLI for `asr defattr` (per-residue posteriors of one sequence). Also the
//! default when `asr` is called with `-i/-o` and no subcommand.
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::{debug, info};
use asrtools::*;

#[derive(Debug, Args)]
pub struct DefattrCmd {
    /// Reconstruction report (text export of an ancestral node).
    #[arg(short, long, value_name="FILE")]
    pub input: PathBuf,
    /// Output defattr file.
    #[arg(short, long, value_name="FILE")]
    pub output: PathBuf,
    /// Target sequence name or 1-based index. Prompts when omitted.
    #[arg(long, value_name="NAME|INDEX")]
    pub sequence: Option<String>,
    /// Overwrite an existing output file without asking.
    #[arg(long, default_value_t=false)]
    pub force: bool,
}

pub fn run(cmd: DefattrCmd) -> Result<()> {
    debug!("input file name is {}", cmd.input.display());
    let text = fs::read_to_string(&cmd.input).with_context(|| format!("open input: {}", cmd.input.display()))?;
    let report = parse_report(&text);

    let outcome = export_defattr(&report, &cmd.output, cmd.sequence.as_deref(), cmd.force, &mut Prompter::stdio())
        .with_context(|| format!("export to {}", cmd.output.display()))?;
    if let Export::Written { target, records } = outcome {
        debug!("{} records written for {}", records, target);
        info!("conversion complete, please check the output file: {}", cmd.output.display());
        report.log_summary();
    }
    Ok(())
}
