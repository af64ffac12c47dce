//! Command-line interface for the `asrtools` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/asr/`:
//! - `defattr_cmd.rs`: posteriors of one reconstructed sequence
//! - `sites_cmd.rs`: top posterior of every alignment site
//! - `list_cmd.rs`: selectable sequences of a report
//!
//! Without a subcommand, `asr -i <FILE> -o <FILE>` runs `defattr`.
//!
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use env_logger::Env;
use log::error;

#[derive(Debug, Parser)]
#[command(name="asr", version=env!("CARGO_PKG_VERSION"), about="Ancestral sequence reconstruction report utilities", disable_help_subcommand=true)]
#[command(args_conflicts_with_subcommands=true, subcommand_negates_reqs=true)]
struct Cli {
    /// Print detailed conversion progress.
    #[arg(short, long, global=true, default_value_t=false)]
    verbose: bool,
    #[command(flatten)]
    defattr: Option<defattr_cmd::DefattrCmd>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export posteriors of a reconstructed sequence as a defattr file.
    Defattr(defattr_cmd::DefattrCmd),
    /// Export the top posterior of every site, numbered by alignment column.
    Sites(sites_cmd::SitesCmd),
    /// List the sequences of a report that can be exported.
    List(list_cmd::ListCmd),
}

#[path = "asr/defattr_cmd.rs"] mod defattr_cmd;
#[path = "asr/sites_cmd.rs"] mod sites_cmd;
#[path = "asr/list_cmd.rs"] mod list_cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let res = match (cli.command, cli.defattr) {
        (Some(Command::Defattr(cmd)), _) | (None, Some(cmd)) => defattr_cmd::run(cmd),
        (Some(Command::Sites(cmd)), _) => sites_cmd::run(cmd),
        (Some(Command::List(cmd)), _) => list_cmd::run(cmd),
        (None, None) => Cli::command().print_help().map_err(Into::into),
    };
    if let Err(err) = res {
        error!("{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}
