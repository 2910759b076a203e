mod cli;
mod config;
mod convert;
mod logging;
mod metadata_cmd;
mod uwg_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use canopy_epw::EpwError;
use canopy_uwg::UwgError;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        match error_kind(&e) {
            Some(kind) => eprintln!("Error [{kind}]: {e:#}"),
            None => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Metadata(args) => metadata_cmd::run(args),
        Command::Uwg(args) => uwg_cmd::run(args),
    }
}

/// Finds the error kind anywhere in the chain.
///
/// Library errors report their own kind. Bare I/O failures (reading the
/// parameter file) are file-access errors and TOML decoding failures are
/// configuration errors.
fn error_kind(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<UwgError>() {
            Some(e.kind())
        } else if let Some(e) = cause.downcast_ref::<EpwError>() {
            Some(e.kind())
        } else if cause.is::<std::io::Error>() {
            Some("FileAccessError")
        } else if cause.is::<toml::de::Error>() {
            Some("ConfigError")
        } else {
            None
        }
    })
}
