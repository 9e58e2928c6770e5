// jmdeps/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use jmdeps_common::error::Result;
use jmdeps_common::Config;

pub mod describe;
pub mod lookup;
pub mod resolve;

use crate::cli::describe::Describe;
use crate::cli::lookup::Lookup;
use crate::cli::resolve::Resolve;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "jmdeps", bin_name = "jmdeps")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Derive dependencies for every project of a session manifest
    Resolve(Resolve),
    /// Show the requires directives of a module descriptor
    Describe(Describe),
    /// Show where module names resolve to
    Lookup(Lookup),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Resolve(command) => command.run(config),
            Self::Describe(command) => command.run(config),
            Self::Lookup(command) => command.run(config),
        }
    }
}
