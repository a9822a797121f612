//! CLI argument parsing tests.

mod parse;

use clap::Parser;

use super::{Cli, CliCommand};

pub(super) fn parse(args: &[&str]) -> CliCommand {
    Cli::try_parse_from(args).expect("args parse").command
}
