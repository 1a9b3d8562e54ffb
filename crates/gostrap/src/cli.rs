//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use gostrap_projects::ProjectKind;

/// gostrap - Scaffold Go projects
#[derive(Parser, Debug)]
#[command(name = "gostrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output; errors are still reported
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new Go project
    New(NewArgs),

    /// List project kinds and CLI frameworks
    List,

    /// Show version information
    Version,
}

// New command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name, created as a directory under the projects directory
    pub name: String,

    /// Kind of project: cli, api, app
    #[arg(short, long, default_value = "cli")]
    pub kind: ProjectKind,

    /// Go module path (defaults to the project name)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Initialize a git repository
    #[arg(short, long)]
    pub git: bool,

    /// CLI framework for cli projects [default: flag]
    #[arg(long = "cli-lib", value_name = "FRAMEWORK")]
    pub cli_lib: Option<String>,

    /// Continue without asking if the directory already exists
    #[arg(short, long)]
    pub yes: bool,
}
