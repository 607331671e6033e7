//! Command-line interface definitions for elfsect.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Read named sections out of ELF64 executables.
#[derive(Parser)]
#[command(name = "elfsect", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Print errors only.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every byte range read and the time spent.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the contents of a section.
    Read(ReadArgs),
    /// List every section with its type, offset and size.
    List(ListArgs),
    /// Print every field of one section header.
    Header(HeaderArgs),
}

/// Arguments for the `read` subcommand.
#[derive(Parser)]
pub struct ReadArgs {
    /// ELF64 image to read from.
    pub file: PathBuf,

    /// Section name, matched exactly (e.g. `.note.gnu.build-id`).
    pub section: String,

    /// Write the raw bytes to stdout instead of hex.
    #[arg(long, conflicts_with = "output")]
    pub raw: bool,

    /// Write the raw bytes to this file.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `list` subcommand.
#[derive(Parser)]
pub struct ListArgs {
    /// ELF64 image to inspect.
    pub file: PathBuf,
}

/// Arguments for the `header` subcommand.
#[derive(Parser)]
pub struct HeaderArgs {
    /// ELF64 image to inspect.
    pub file: PathBuf,

    /// Section header table index.
    pub index: u16,
}
