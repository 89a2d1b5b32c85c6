//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Reduce grammar inference trees to compact operation trees
#[derive(Parser, Debug)]
#[command(name = "optree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (-d, -dd, -ddd)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reduce an inference tree to an operation tree
    Convert {
        /// Tree document produced by the analyzer
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Echo each intermediate tree
        #[arg(short, long)]
        steps: bool,

        /// Wait for Enter between steps (implies --steps)
        #[arg(short, long)]
        pause: bool,
    },

    /// Print an inference tree without reducing it
    Show {
        /// Tree document produced by the analyzer
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Check that a tree reduces completely
    Check {
        /// Tree document produced by the analyzer
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config path
    Path,
}
