//! # gitmir
//!
//! **gitmir** is a minimal git mirror manager.
//!
//! Features:
//! - Manage mirror targets defined in `$(gitmir home)/config.toml`
//! - `gitmir sync` clones or updates the configured mirrors and records a
//!   last-activity stamp for repository web front-ends
//! - `gitmir list` prints the configured targets with their resolved paths
//! - `gitmir home` prints the gitmir home directory
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitmir::{cmd_list, cmd_sync, gitmir_home};

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "gitmir",
    version,
    about = "gitmir - minimal git mirror manager",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

/// Available subcommands.
///
/// Each variant corresponds to a subcommand of `gitmir`.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Clone/update mirrors defined in config.toml
    Sync,
    /// List configured mirror targets
    List,
    /// Print the gitmir home directory
    Home,
}

/// CLI entry point.
///
/// Parses arguments with `clap` and executes the selected subcommand.
fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap();

    match cmd {
        Cmd::Sync => cmd_sync(),
        Cmd::List => cmd_list(),
        Cmd::Home => {
            println!("{}", gitmir_home()?.display());
            Ok(())
        }
    }
}
