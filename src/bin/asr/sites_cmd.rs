//! CLI for `asr sites` (top posterior per alignment site).
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use asrtools::*;

#[derive(Debug, Args)]
pub struct SitesCmd {
    /// Reconstruction report (text export of an ancestral node).
    #[arg(short, long, value_name="FILE")]
    pub input: PathBuf,
    /// Output defattr file.
    #[arg(short, long, value_name="FILE")]
    pub output: PathBuf,
    /// Overwrite an existing output file without asking.
    #[arg(long, default_value_t=false)]
    pub force: bool,
}

pub fn run(cmd: SitesCmd) -> Result<()> {
    let text = fs::read_to_string(&cmd.input).with_context(|| format!("open input: {}", cmd.input.display()))?;
    let report = parse_report(&text);

    let outcome = export_sites(&report, &cmd.output, cmd.force, &mut Prompter::stdio())
        .with_context(|| format!("export to {}", cmd.output.display()))?;
    if outcome != Export::Declined {
        info!("conversion complete, please check the output file: {}", cmd.output.display());
        report.log_summary();
    }
    Ok(())
}
