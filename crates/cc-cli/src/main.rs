//! cellcohort CLI - load immune cell counts and compare cohorts

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{compare, export, load, mean, summary};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    match &cli.command {
        cli::Commands::Load(args) => load::execute(args, &cli.global),
        cli::Commands::Compare(args) => compare::execute(args, &cli.global),
        cli::Commands::Summary(args) => summary::execute(args, &cli.global),
        cli::Commands::Mean(args) => mean::execute(args, &cli.global),
        cli::Commands::Export(args) => export::execute(args, &cli.global),
    }
}
