//! `pathslug` binary entry point.
use anyhow::Result;
use clap::Parser;

use pathslug::{cli, commands};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    commands::rename::run(&args)
}
